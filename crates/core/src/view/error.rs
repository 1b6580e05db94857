use thiserror::Error;

/// # Summary
/// 页面组件状态错误枚举。
///
/// # Invariants
/// - 发生错误时组件状态保持不变。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    // 轮播序号超出 [1, count]
    #[error("Index {index} out of range 1..={count}")]
    IndexOutOfRange { index: usize, count: usize },
    // 选中的代码不在当前建议列表中
    #[error("Suggestion not offered: {0}")]
    UnknownSuggestion(String),
}
