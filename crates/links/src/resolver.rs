use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use stockpage_core::redirect::entity::RedirectTarget;
use stockpage_core::redirect::error::RedirectError;
use stockpage_core::redirect::port::LinkSource;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// # Summary
/// 跳转目标解析器。
///
/// # Invariants
/// - 每次页面加载至多发起一次请求，目标至多写入一次。
/// - 解析失败只记录日志，目标保持缺省，绝不向上抛出致命错误。
/// - 读取方不会阻塞等待请求完成。
pub struct RedirectResolver {
    source: Arc<dyn LinkSource>,
    // 是否已发起过请求
    attempted: AtomicBool,
    target: OnceLock<RedirectTarget>,
}

impl RedirectResolver {
    pub fn new(source: Arc<dyn LinkSource>) -> Self {
        Self {
            source,
            attempted: AtomicBool::new(false),
            target: OnceLock::new(),
        }
    }

    /// # Summary
    /// 解析跳转目标。
    ///
    /// # Logic
    /// 1. 已发起过请求时直接返回当前结果，不再请求。
    /// 2. 拉取链接列表并取第一条的 `redirectUrl`。
    /// 3. 任何失败记录诊断日志并返回 None。
    ///
    /// # Returns
    /// 解析成功返回目标 URL。
    pub async fn resolve(&self) -> Option<String> {
        if self.attempted.swap(true, Ordering::SeqCst) {
            return self.target();
        }

        match self.fetch_target().await {
            Ok(target) => {
                info!("Redirect URL loaded: {}", target.url);
                let url = target.url.clone();
                if self.target.set(target).is_err() {
                    warn!("Redirect target already set, keeping the first value");
                }
                Some(url)
            }
            Err(e) => {
                warn!("Failed to fetch redirect URL: {}", e);
                None
            }
        }
    }

    /// # Summary
    /// 在后台任务中执行 `resolve`，不阻塞页面初始化。
    ///
    /// # Returns
    /// 后台任务句柄。
    pub fn spawn_resolve(self: &Arc<Self>) -> JoinHandle<Option<String>> {
        let resolver = Arc::clone(self);
        tokio::spawn(async move { resolver.resolve().await })
    }

    /// 当前已解析的目标，未解析时为 None。
    pub fn target(&self) -> Option<String> {
        self.target.get().map(|t| t.url.clone())
    }

    /// # Summary
    /// 读取目标，未解析时返回兜底地址。
    ///
    /// # Arguments
    /// * `fallback`: 兜底地址。
    pub fn target_or_default(&self, fallback: &str) -> String {
        self.target().unwrap_or_else(|| fallback.to_string())
    }

    async fn fetch_target(&self) -> Result<RedirectTarget, RedirectError> {
        self.source.fetch_links().await?.first_target()
    }
}
