use crate::redirect::entity::LinksEnvelope;
use crate::redirect::error::RedirectError;
use async_trait::async_trait;

/// # Summary
/// 分流链接数据源接口 (Port)。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync`，可在后台任务中调用。
/// - 只负责传输与反序列化，不解释 `code` 与 `data` 的业务含义。
#[async_trait]
pub trait LinkSource: Send + Sync {
    /// # Summary
    /// 拉取分流链接列表。
    ///
    /// # Logic
    /// 1. 向后台发起一次请求。
    /// 2. 校验 HTTP 状态并解析响应信封。
    ///
    /// # Returns
    /// * 成功返回 `LinksEnvelope`。
    /// * 网络、状态码或解析失败返回 `RedirectError`。
    async fn fetch_links(&self) -> Result<LinksEnvelope, RedirectError>;
}
