//! # 测试工具
//!
//! 供各 crate 测试复用的渲染记录器与链接数据源桩。

use crate::analysis::entity::ProgressFrame;
use crate::common::SymbolRecord;
use crate::redirect::entity::{LinkRecord, LinksEnvelope};
use crate::redirect::error::RedirectError;
use crate::redirect::port::LinkSource;
use crate::view::port::{
    AnalysisView, ConversionReporter, CounterView, Navigator, SuggestionView, TestimonialView,
};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// # Summary
/// 渲染输出的当前快照。
///
/// # Invariants
/// - `suggestions` 为 `None` 表示建议列表处于隐藏状态。
/// - `testimonials` 与 `indicators` 以 0 为下标，对应槽位 1..=N。
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub suggestions: Option<Vec<SymbolRecord>>,
    pub input_text: String,
    pub testimonials: Vec<bool>,
    pub indicators: Vec<bool>,
    pub counter_text: Option<String>,
    pub counter_renders: usize,
    pub trigger_enabled: bool,
    pub trigger_label: Option<String>,
    pub modal_visible: bool,
    pub progress_visible: bool,
    pub result_visible: bool,
    pub progress_history: Vec<ProgressFrame>,
    pub result_text: Option<String>,
    pub result_renders: usize,
    pub alerts: Vec<String>,
    pub navigations: Vec<String>,
    pub conversions: Vec<String>,
}

impl Default for PageSnapshot {
    fn default() -> Self {
        Self {
            suggestions: None,
            input_text: String::new(),
            testimonials: Vec::new(),
            indicators: Vec::new(),
            counter_text: None,
            counter_renders: 0,
            trigger_enabled: true,
            trigger_label: None,
            modal_visible: false,
            progress_visible: false,
            result_visible: false,
            progress_history: Vec::new(),
            result_text: None,
            result_renders: 0,
            alerts: Vec::new(),
            navigations: Vec::new(),
            conversions: Vec::new(),
        }
    }
}

impl PageSnapshot {
    pub fn active_testimonials(&self) -> Vec<usize> {
        active_slots(&self.testimonials)
    }

    pub fn active_indicators(&self) -> Vec<usize> {
        active_slots(&self.indicators)
    }

    pub fn last_progress(&self) -> Option<ProgressFrame> {
        self.progress_history.last().copied()
    }
}

fn active_slots(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter(|(_, active)| **active)
        .map(|(i, _)| i + 1)
        .collect()
}

fn set_slot(flags: &mut Vec<bool>, slot: usize, active: bool) {
    if slot == 0 {
        return;
    }
    if flags.len() < slot {
        flags.resize(slot, false);
    }
    flags[slot - 1] = active;
}

/// # Summary
/// 记录所有渲染调用的视图实现，同时实现全部渲染端口。
#[derive(Default)]
pub struct RecordingView {
    state: Mutex<PageSnapshot>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 复制当前快照。
    pub fn snapshot(&self) -> PageSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PageSnapshot> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SuggestionView for RecordingView {
    fn render_suggestions(&self, items: &[SymbolRecord]) {
        self.lock().suggestions = Some(items.to_vec());
    }

    fn hide_suggestions(&self) {
        self.lock().suggestions = None;
    }

    fn set_input_text(&self, text: &str) {
        self.lock().input_text = text.to_string();
    }
}

impl TestimonialView for RecordingView {
    fn set_testimonial_active(&self, slot: usize, active: bool) {
        set_slot(&mut self.lock().testimonials, slot, active);
    }

    fn set_indicator_active(&self, slot: usize, active: bool) {
        set_slot(&mut self.lock().indicators, slot, active);
    }
}

impl CounterView for RecordingView {
    fn render_counter(&self, text: &str) {
        let mut state = self.lock();
        state.counter_text = Some(text.to_string());
        state.counter_renders += 1;
    }
}

impl AnalysisView for RecordingView {
    fn set_trigger(&self, enabled: bool, label: &str) {
        let mut state = self.lock();
        state.trigger_enabled = enabled;
        state.trigger_label = Some(label.to_string());
    }

    fn set_modal_visible(&self, visible: bool) {
        self.lock().modal_visible = visible;
    }

    fn set_progress_visible(&self, visible: bool) {
        self.lock().progress_visible = visible;
    }

    fn set_result_visible(&self, visible: bool) {
        self.lock().result_visible = visible;
    }

    fn render_progress(&self, frame: &ProgressFrame) {
        self.lock().progress_history.push(*frame);
    }

    fn render_result(&self, stock_code: &str) {
        let mut state = self.lock();
        state.result_text = Some(stock_code.to_string());
        state.result_renders += 1;
    }

    fn alert(&self, message: &str) {
        self.lock().alerts.push(message.to_string());
    }
}

impl Navigator for RecordingView {
    fn navigate(&self, url: &str) {
        self.lock().navigations.push(url.to_string());
    }
}

impl ConversionReporter for RecordingView {
    fn report_conversion(&self, url: &str) {
        self.lock().conversions.push(url.to_string());
    }
}

/// # Summary
/// 返回预设结果的链接数据源，并统计调用次数。
pub struct StaticLinkSource {
    response: Result<LinksEnvelope, RedirectError>,
    calls: AtomicUsize,
}

impl StaticLinkSource {
    pub fn new(response: Result<LinksEnvelope, RedirectError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }

    /// 构造只含一条链接的成功响应。
    pub fn with_url(url: &str) -> Self {
        Self::new(Ok(LinksEnvelope {
            code: 200,
            msg: Some("success".to_string()),
            data: Some(vec![LinkRecord {
                redirect_url: Some(url.to_string()),
                click_id: None,
                user_name: None,
            }]),
        }))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkSource for StaticLinkSource {
    async fn fetch_links(&self) -> Result<LinksEnvelope, RedirectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// # Summary
/// 在 `open` 被调用之前一直挂起的链接数据源，用于模拟尚未完成的请求。
pub struct GatedLinkSource {
    inner: StaticLinkSource,
    gate: Notify,
}

impl GatedLinkSource {
    pub fn new(inner: StaticLinkSource) -> Self {
        Self {
            inner,
            gate: Notify::new(),
        }
    }

    /// 放行挂起中的请求。
    pub fn open(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl LinkSource for GatedLinkSource {
    async fn fetch_links(&self) -> Result<LinksEnvelope, RedirectError> {
        self.gate.notified().await;
        self.inner.fetch_links().await
    }
}
