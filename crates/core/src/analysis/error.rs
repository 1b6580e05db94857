use thiserror::Error;

/// # Summary
/// 模拟分析流程错误枚举。
///
/// # Invariants
/// - `Validation` 需以阻塞提示的形式展示给用户。
/// - `ConcurrentTrigger` 仅在调用方绕过按钮禁用时出现，只记录日志，不提示用户。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// 触发时股票代码为空
    #[error("Validation error: {0}")]
    Validation(String),

    /// 上一个分析周期尚未结束时再次触发
    #[error("Concurrent trigger rejected while analysing {0}")]
    ConcurrentTrigger(String),
}
