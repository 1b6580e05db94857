use crate::resolver::RedirectResolver;
use std::sync::Arc;
use stockpage_core::view::port::{ConversionReporter, Navigator};
use tracing::info;

/// 行动按钮点击后的去向
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtaOutcome {
    // 交给转化上报回调，由其完成跳转
    Reported(String),
    // 未解析到目标，跳转到站内兜底路径
    Fallback(String),
}

/// # Summary
/// 行动按钮 (Call-to-action) 点击处理器。
///
/// # Invariants
/// - 点击时读取解析器的当前值，不等待尚未完成的请求。
pub struct CallToAction {
    resolver: Arc<RedirectResolver>,
    reporter: Arc<dyn ConversionReporter>,
    navigator: Arc<dyn Navigator>,
    fallback_path: String,
}

impl CallToAction {
    pub fn new(
        resolver: Arc<RedirectResolver>,
        reporter: Arc<dyn ConversionReporter>,
        navigator: Arc<dyn Navigator>,
        fallback_path: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            reporter,
            navigator,
            fallback_path: fallback_path.into(),
        }
    }

    /// # Summary
    /// 处理按钮点击。
    ///
    /// # Logic
    /// 1. 已解析到目标：调用转化上报回调并传入目标 URL。
    /// 2. 否则：直接跳转到兜底路径。
    ///
    /// # Returns
    /// 本次点击的去向。
    pub fn on_click(&self) -> CtaOutcome {
        match self.resolver.target() {
            Some(url) => {
                info!("Call-to-action reporting conversion for {}", url);
                self.reporter.report_conversion(&url);
                CtaOutcome::Reported(url)
            }
            None => {
                info!(
                    "Call-to-action without redirect target, navigating to {}",
                    self.fallback_path
                );
                self.navigator.navigate(&self.fallback_path);
                CtaOutcome::Fallback(self.fallback_path.clone())
            }
        }
    }
}
