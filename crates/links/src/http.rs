use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use stockpage_core::redirect::entity::LinksEnvelope;
use stockpage_core::redirect::error::RedirectError;
use stockpage_core::redirect::port::LinkSource;
use tracing::debug;

/// # Summary
/// 基于 HTTP 的分流链接数据源，请求 `GET /api/get-links`。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端，带请求超时。
#[derive(Clone)]
pub struct HttpLinkSource {
    // 完整的接口地址
    endpoint: String,
    client: Client,
}

impl HttpLinkSource {
    /// # Summary
    /// 创建 HttpLinkSource 实例。
    ///
    /// # Logic
    /// 1. 安装 ring 作为进程级 TLS 加密后端 (已安装时跳过)。
    /// 2. 以给定超时构建 reqwest 客户端。
    ///
    /// # Arguments
    /// * `endpoint`: 链接列表接口的完整 URL。
    /// * `timeout`: 单次请求超时。
    ///
    /// # Returns
    /// 客户端构建失败时返回 `RedirectError::Config`。
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RedirectError> {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("TLS crypto provider already installed");
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RedirectError::Config(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LinkSource for HttpLinkSource {
    /// # Summary
    /// 拉取分流链接列表。
    ///
    /// # Logic
    /// 1. 发起 GET 请求。
    /// 2. 非 2xx 状态直接返回 `Status`，不读取响应体。
    /// 3. 将响应体解析为 `LinksEnvelope`，失败返回 `Malformed`。
    async fn fetch_links(&self) -> Result<LinksEnvelope, RedirectError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| RedirectError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(RedirectError::Status(resp.status().as_u16()));
        }

        resp.json::<LinksEnvelope>()
            .await
            .map_err(|e| RedirectError::Malformed(e.to_string()))
    }
}
