//! # 终端渲染适配器
//!
//! 把各组件的渲染调用翻译为标准输出上的文本行。日志走 stderr，互不混杂。

use std::sync::Mutex;
use stockpage_core::analysis::entity::ProgressFrame;
use stockpage_core::common::SymbolRecord;
use stockpage_core::view::port::{
    AnalysisView, ConversionReporter, CounterView, Navigator, SuggestionView, TestimonialView,
};
use tracing::info;

/// # Summary
/// 终端版页面视图，实现全部渲染端口。
///
/// # Invariants
/// - 轮播只在激活时输出，取消激活静默处理。
/// - 进度条按整数百分比去重，避免每个 tick 刷屏。
#[derive(Default)]
pub struct ConsoleView {
    // 最近一次输出的进度 (整数百分比)
    last_progress: Mutex<Option<[u8; 3]>>,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&self, area: &str, text: &str) {
        println!("[{area}] {text}");
    }
}

fn percent_bucket(value: f64) -> u8 {
    // 值域已由 ProgressFrame 保证在 [0, 100]
    let mut bucket = 0u8;
    while bucket < 100 && f64::from(bucket + 1) <= value {
        bucket += 1;
    }
    bucket
}

impl SuggestionView for ConsoleView {
    fn render_suggestions(&self, items: &[SymbolRecord]) {
        let list: Vec<String> = items.iter().map(ToString::to_string).collect();
        self.emit("suggestions", &list.join(" | "));
    }

    fn hide_suggestions(&self) {}

    fn set_input_text(&self, text: &str) {
        self.emit("input", text);
    }
}

impl TestimonialView for ConsoleView {
    fn set_testimonial_active(&self, slot: usize, active: bool) {
        if active {
            self.emit("testimonial", &format!("#{slot}"));
        }
    }

    fn set_indicator_active(&self, _slot: usize, _active: bool) {}
}

impl CounterView for ConsoleView {
    fn render_counter(&self, text: &str) {
        self.emit("users", text);
    }
}

impl AnalysisView for ConsoleView {
    fn set_trigger(&self, enabled: bool, label: &str) {
        let state = if enabled { "enabled" } else { "disabled" };
        self.emit("analyze", &format!("{label} ({state})"));
    }

    fn set_modal_visible(&self, visible: bool) {
        self.emit("modal", if visible { "shown" } else { "hidden" });
    }

    fn set_progress_visible(&self, visible: bool) {
        if !visible {
            self.emit("progress", "done");
        }
    }

    fn set_result_visible(&self, _visible: bool) {}

    fn render_progress(&self, frame: &ProgressFrame) {
        let buckets = frame.bars.map(percent_bucket);
        let mut last = self.last_progress.lock().unwrap_or_else(|e| e.into_inner());
        // 只在每 10% 的边界或归零时输出一行
        let changed = match *last {
            None => true,
            Some(prev) => prev
                .iter()
                .zip(buckets.iter())
                .any(|(a, b)| a / 10 != b / 10),
        };
        *last = Some(buckets);
        if changed {
            self.emit(
                "progress",
                &format!("{}% {}% {}%", buckets[0], buckets[1], buckets[2]),
            );
        }
    }

    fn render_result(&self, stock_code: &str) {
        self.emit("result", &format!("AI analysis ready for {stock_code}"));
    }

    fn alert(&self, message: &str) {
        self.emit("alert", message);
    }
}

impl Navigator for ConsoleView {
    fn navigate(&self, url: &str) {
        self.emit("navigate", url);
    }
}

impl ConversionReporter for ConsoleView {
    fn report_conversion(&self, url: &str) {
        info!("Conversion reported for {}", url);
        self.emit("conversion", url);
        self.navigate(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_bucket() {
        assert_eq!(percent_bucket(0.0), 0);
        assert_eq!(percent_bucket(25.5), 25);
        assert_eq!(percent_bucket(99.99), 99);
        assert_eq!(percent_bucket(100.0), 100);
    }
}
