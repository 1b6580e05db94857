use crate::catalog::SymbolCatalog;
use std::sync::{Arc, Mutex, MutexGuard};
use stockpage_core::common::SymbolRecord;
use stockpage_core::view::error::WidgetError;
use stockpage_core::view::port::SuggestionView;
use tracing::debug;

/// 建议列表的显示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionState {
    Closed,
    Open,
}

/// 搜索框内部状态
struct InputState {
    // 输入框当前文本 (原样保存)
    text: String,
    // 当前展示中的建议，Closed 时为空
    suggestions: Vec<SymbolRecord>,
    state: SuggestionState,
}

/// # Summary
/// 股票代码搜索框的自动补全控制器。
///
/// # Invariants
/// - `Open` 状态下建议列表非空，`Closed` 状态下为空。
/// - 每次输入同步过滤，不做防抖 (目录规模固定且很小)。
pub struct AutocompleteController {
    catalog: Arc<SymbolCatalog>,
    view: Arc<dyn SuggestionView>,
    inner: Mutex<InputState>,
}

impl AutocompleteController {
    pub fn new(catalog: Arc<SymbolCatalog>, view: Arc<dyn SuggestionView>) -> Self {
        Self {
            catalog,
            view,
            inner: Mutex::new(InputState {
                text: String::new(),
                suggestions: Vec::new(),
                state: SuggestionState::Closed,
            }),
        }
    }

    /// # Summary
    /// 处理输入框文本变化。
    ///
    /// # Logic
    /// 1. 保存原始文本。
    /// 2. 以文本查询目录。
    /// 3. 结果非空则渲染并进入 `Open`，否则关闭列表。
    ///
    /// # Arguments
    /// * `text`: 输入框的最新文本。
    pub fn on_input(&self, text: &str) {
        let mut inner = self.lock();
        inner.text = text.to_string();

        let found = self.catalog.lookup(text);
        debug!("Autocomplete query {:?} -> {} matches", text, found.len());
        if found.is_empty() {
            self.close(&mut inner);
            return;
        }

        self.view.render_suggestions(&found);
        inner.suggestions = found;
        inner.state = SuggestionState::Open;
    }

    /// # Summary
    /// 选中一条建议。
    ///
    /// # Logic
    /// 1. 校验代码属于当前展示中的建议。
    /// 2. 以代码覆盖输入框文本 (不带名称后缀)。
    /// 3. 关闭建议列表。
    ///
    /// # Arguments
    /// * `symbol`: 建议项携带的代码。
    ///
    /// # Returns
    /// 代码不在当前建议中时返回 `WidgetError::UnknownSuggestion`，状态不变。
    pub fn select(&self, symbol: &str) -> Result<(), WidgetError> {
        let mut inner = self.lock();
        let chosen = inner
            .suggestions
            .iter()
            .find(|r| r.symbol == symbol)
            .map(|r| r.symbol.clone())
            .ok_or_else(|| WidgetError::UnknownSuggestion(symbol.to_string()))?;

        self.view.set_input_text(&chosen);
        inner.text = chosen;
        self.close(&mut inner);
        Ok(())
    }

    /// # Summary
    /// 处理文档任意位置的点击。
    ///
    /// # Arguments
    /// * `inside_input_group`: 点击目标是否位于输入框所在的分组内。
    pub fn on_document_click(&self, inside_input_group: bool) {
        if !inside_input_group {
            let mut inner = self.lock();
            self.close(&mut inner);
        }
    }

    /// 输入框当前文本。
    pub fn input_text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn state(&self) -> SuggestionState {
        self.lock().state
    }

    pub fn suggestions(&self) -> Vec<SymbolRecord> {
        self.lock().suggestions.clone()
    }

    fn close(&self, inner: &mut InputState) {
        inner.suggestions.clear();
        inner.state = SuggestionState::Closed;
        self.view.hide_suggestions();
    }

    fn lock(&self) -> MutexGuard<'_, InputState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpage_core::test_utils::RecordingView;

    fn setup() -> (AutocompleteController, Arc<RecordingView>) {
        let view = Arc::new(RecordingView::new());
        let controller = AutocompleteController::new(Arc::new(SymbolCatalog::popular()), view.clone());
        (controller, view)
    }

    #[test]
    fn test_input_opens_suggestions() {
        let (controller, view) = setup();
        controller.on_input("msf");

        assert_eq!(controller.state(), SuggestionState::Open);
        let shown = view.snapshot().suggestions.unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].symbol, "MSFT");
        assert_eq!(controller.input_text(), "msf");
    }

    #[test]
    fn test_empty_or_unmatched_input_closes() {
        let (controller, view) = setup();
        controller.on_input("a");
        assert_eq!(controller.state(), SuggestionState::Open);

        controller.on_input("");
        assert_eq!(controller.state(), SuggestionState::Closed);
        assert!(view.snapshot().suggestions.is_none());

        controller.on_input("a");
        controller.on_input("qqqq");
        assert_eq!(controller.state(), SuggestionState::Closed);
        assert!(controller.suggestions().is_empty());
    }

    #[test]
    fn test_select_commits_ticker() {
        let (controller, view) = setup();
        controller.on_input("tes");
        controller.select("TSLA").unwrap();

        assert_eq!(controller.input_text(), "TSLA");
        assert_eq!(view.snapshot().input_text, "TSLA");
        assert_eq!(controller.state(), SuggestionState::Closed);
        assert!(view.snapshot().suggestions.is_none());
    }

    #[test]
    fn test_select_unknown_is_rejected() {
        let (controller, _view) = setup();
        controller.on_input("tes");
        let err = controller.select("AAPL").unwrap_err();
        assert_eq!(err, WidgetError::UnknownSuggestion("AAPL".to_string()));
        assert_eq!(controller.state(), SuggestionState::Open);
        assert_eq!(controller.input_text(), "tes");
    }

    #[test]
    fn test_click_outside_closes() {
        let (controller, view) = setup();
        controller.on_input("a");

        controller.on_document_click(true);
        assert_eq!(controller.state(), SuggestionState::Open);

        controller.on_document_click(false);
        assert_eq!(controller.state(), SuggestionState::Closed);
        assert!(view.snapshot().suggestions.is_none());
        // 关闭列表不影响输入文本
        assert_eq!(controller.input_text(), "a");
    }
}
