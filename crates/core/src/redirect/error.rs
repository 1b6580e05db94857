use thiserror::Error;

/// # Summary
/// 跳转地址解析错误枚举。
///
/// # Invariants
/// - 全部错误都在解析器内部恢复：记录日志，目标保持缺省，不打断页面初始化。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedirectError {
    // 网络层错误 (连接失败、超时)
    #[error("Network error: {0}")]
    Network(String),
    // HTTP 状态码非 2xx
    #[error("HTTP status {0}")]
    Status(u16),
    // 响应体不是预期的 JSON 结构
    #[error("Malformed response: {0}")]
    Malformed(String),
    // 响应信封中的 code 不为 200
    #[error("Rejected by backend (code {code}): {msg}")]
    Rejected { code: i64, msg: String },
    // 链接列表为空
    #[error("No redirect links available")]
    Empty,
    // HTTP 客户端构建失败
    #[error("Configuration error: {0}")]
    Config(String),
}
