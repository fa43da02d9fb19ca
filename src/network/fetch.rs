use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::core::{ProxyError, ProxyResult};
use crate::parsers::html::{charset_from_content_type, decode_html_bytes};

/// 页面抓取器
///
/// 内部的 `reqwest::Client` 自带连接池，克隆开销很小。
#[derive(Debug, Clone)]
pub struct PageFetcher {
    http: reqwest::Client,
}

impl PageFetcher {
    /// 创建抓取器，超时作用于整个请求
    pub fn new(timeout: Duration) -> ProxyResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| ProxyError::UpstreamFetch(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self { http })
    }

    /// 共享的 HTTP 客户端
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// 抓取页面并按 `Content-Type` 中的字符集解码
    ///
    /// 非 2xx 状态视为失败。
    pub async fn fetch_html(&self, url: &str) -> ProxyResult<String> {
        tracing::debug!("抓取页面: {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ProxyError::UpstreamFetch(format!("无法访问 {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamFetch(format!(
                "{} 返回状态码 {}",
                url,
                status.as_u16()
            )));
        }

        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_from_content_type);

        let body = response
            .bytes()
            .await
            .map_err(|e| ProxyError::UpstreamFetch(format!("读取响应失败: {}", e)))?;

        Ok(decode_html_bytes(&body, charset.as_deref()))
    }
}
