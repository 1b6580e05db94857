//! # 渲染端口
//!
//! 组件只维护自身状态，通过以下接口把状态翻译成可见输出。
//! 具体实现 (浏览器 DOM、终端、测试记录器) 由外部注入。

use crate::analysis::entity::ProgressFrame;
use crate::common::SymbolRecord;

/// # Summary
/// 搜索框与建议列表的渲染接口。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync`。
pub trait SuggestionView: Send + Sync {
    /// 按给定顺序展示建议列表，每项以代码作为可选中的载荷。
    fn render_suggestions(&self, items: &[SymbolRecord]);

    /// 隐藏建议列表。
    fn hide_suggestions(&self);

    /// 覆盖输入框文本。
    fn set_input_text(&self, text: &str);
}

/// # Summary
/// 用户评价轮播的渲染接口。槽位编号从 1 开始。
pub trait TestimonialView: Send + Sync {
    /// 设置第 `slot` 条评价是否处于激活状态。
    fn set_testimonial_active(&self, slot: usize, active: bool);

    /// 设置第 `slot` 个位置指示点是否处于激活状态。
    fn set_indicator_active(&self, slot: usize, active: bool);
}

/// 访客计数器的渲染接口。
pub trait CounterView: Send + Sync {
    fn render_counter(&self, text: &str);
}

/// # Summary
/// 模拟分析弹窗的渲染接口。
///
/// # Invariants
/// - `alert` 为阻塞式用户提示，仅用于校验失败。
pub trait AnalysisView: Send + Sync {
    /// 设置触发按钮的可用状态与文字。
    fn set_trigger(&self, enabled: bool, label: &str);

    fn set_modal_visible(&self, visible: bool);

    fn set_progress_visible(&self, visible: bool);

    fn set_result_visible(&self, visible: bool);

    /// 刷新三根进度条的宽度。
    fn render_progress(&self, frame: &ProgressFrame);

    /// 在结果区写入股票代码。
    fn render_result(&self, stock_code: &str);

    fn alert(&self, message: &str);
}

/// 页面跳转接口。
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// # Summary
/// 转化上报回调 (外部协作方)。
///
/// # Invariants
/// - 约定由实现方在上报后完成跳转。
pub trait ConversionReporter: Send + Sync {
    fn report_conversion(&self, url: &str);
}
