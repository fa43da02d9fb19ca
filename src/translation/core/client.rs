//! 翻译客户端
//!
//! `TranslationProvider` 是外部翻译服务的抽象，`DeepSeekProvider` 是基于 reqwest 的实现。
//! `TranslationClient` 在其外层处理空文本短路、未配置检查、长度截断和重试。
//!
//! ## 服务协议
//!
//! ```text
//! POST <api_url>
//! Authorization: Bearer <api_key>
//! {"text": "...", "target_lang": "es"}
//!
//! 200 {"data": {"translations": [{"text": "..."}]}}
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::translation::{
    config::{constants::MAX_TEXT_LENGTH, ProviderConfig},
    error::{ProviderFailure, TranslationError, TranslationResult},
};

/// 外部翻译服务
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// 是否具备调用所需的凭据
    fn is_configured(&self) -> bool;

    /// 翻译一段文本
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderFailure>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
}

/// DeepSeek 翻译服务
#[derive(Debug, Clone)]
pub struct DeepSeekProvider {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeepSeekProvider {
    /// 按配置创建，超时作用于整个请求
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderFailure> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.trim().to_string(),
            api_url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl TranslationProvider for DeepSeekProvider {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ProviderFailure> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&TranslateRequest {
                text,
                target_lang: target_language,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let parsed: TranslateResponse = serde_json::from_slice(&body)
            .map_err(|e| ProviderFailure::MalformedResponse(e.to_string()))?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or(ProviderFailure::EmptyTranslation)
    }
}

/// 翻译客户端
///
/// 不做缓存；缓存由 `TranslationService` 负责。
#[derive(Clone)]
pub struct TranslationClient {
    provider: Arc<dyn TranslationProvider>,
    max_retries: u32,
    retry_delay: Duration,
}

impl TranslationClient {
    pub fn new(
        provider: Arc<dyn TranslationProvider>,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            provider,
            max_retries,
            retry_delay,
        }
    }

    /// 使用 DeepSeek 服务创建客户端
    pub fn from_config(config: &ProviderConfig) -> TranslationResult<Self> {
        let provider = DeepSeekProvider::new(config)?;
        Ok(Self::new(Arc::new(provider), config.max_retries, config.retry_delay))
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// 翻译文本
    ///
    /// 空白文本原样返回且不调用服务；超过最大长度的文本被截断后提交。
    pub async fn translate(&self, text: &str, target_language: &str) -> TranslationResult<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        if !self.provider.is_configured() {
            return Err(TranslationError::NotConfigured);
        }

        let text = truncate_chars(text, MAX_TEXT_LENGTH);

        let mut attempt = 0;
        loop {
            match self.provider.translate(text, target_language).await {
                Ok(translated) => return Ok(translated),
                Err(failure) if failure.is_retryable() && attempt < self.max_retries => {
                    // 指数退避：base_delay * 2^attempt
                    let delay = self.retry_delay.saturating_mul(1 << attempt.min(16));
                    attempt += 1;
                    tracing::warn!(
                        "翻译失败，{}ms后重试 (尝试 {}/{}): {}",
                        delay.as_millis(),
                        attempt + 1,
                        self.max_retries + 1,
                        failure
                    );
                    sleep(delay).await;
                }
                Err(failure) => return Err(failure.into()),
            }
        }
    }
}

/// 按字符截断，不会切断多字节字符
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            tracing::debug!("文本超过 {} 字符，已截断", max_chars);
            &text[..byte_index]
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// 记录收到的文本
    #[derive(Default)]
    struct RecordingProvider {
        received: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TranslationProvider for RecordingProvider {
        fn is_configured(&self) -> bool {
            true
        }

        async fn translate(
            &self,
            text: &str,
            _target_language: &str,
        ) -> Result<String, ProviderFailure> {
            self.received.lock().unwrap().push(text.to_string());
            Ok(text.to_uppercase())
        }
    }

    fn client_for(server: &MockServer, api_key: &str, max_retries: u32) -> TranslationClient {
        let config = ProviderConfig {
            api_key: api_key.to_string(),
            api_url: format!("{}/v1/translate", server.uri()),
            timeout: Duration::from_secs(5),
            max_retries,
            retry_delay: Duration::ZERO,
        };
        TranslationClient::from_config(&config).unwrap()
    }

    fn translations(texts: &[&str]) -> serde_json::Value {
        let items: Vec<_> = texts.iter().map(|t| json!({ "text": t })).collect();
        json!({ "data": { "translations": items } })
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 2), "he");
        assert_eq!(truncate_chars("你好世界", 2), "你好");
        assert_eq!(truncate_chars("", 2), "");
    }

    #[tokio::test]
    async fn test_blank_text_short_circuits() {
        let provider = Arc::new(RecordingProvider::default());
        let client = TranslationClient::new(provider.clone(), 0, Duration::ZERO);

        assert_eq!(client.translate("", "es").await.unwrap(), "");
        assert_eq!(client.translate("  \n\t", "es").await.unwrap(), "  \n\t");
        assert!(provider.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_long_text_is_truncated() {
        let provider = Arc::new(RecordingProvider::default());
        let client = TranslationClient::new(provider.clone(), 0, Duration::ZERO);

        let long = "é".repeat(MAX_TEXT_LENGTH + 100);
        client.translate(&long, "fr").await.unwrap();

        let received = provider.received.lock().unwrap();
        assert_eq!(received[0].chars().count(), MAX_TEXT_LENGTH);
    }

    #[tokio::test]
    async fn test_successful_translation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/translate"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({ "text": "Hello", "target_lang": "es" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(translations(&["Hola", "ignored"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, "sk-test", 2);
        assert_eq!(client.translate("Hello", "es").await.unwrap(), "Hola");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translations(&["x"])))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, "", 2);
        assert!(!client.is_configured());
        assert_eq!(
            client.translate("Hello", "es").await.unwrap_err(),
            TranslationError::NotConfigured
        );
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(3)
            .mount(&server)
            .await;

        let client = client_for(&server, "sk-test", 2);
        let err = client.translate("Hello", "es").await.unwrap_err();
        assert_eq!(
            err,
            TranslationError::Unavailable(ProviderFailure::Status {
                status: 500,
                body: "boom".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translations(&["Hallo"])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, "sk-test", 2);
        assert_eq!(client.translate("Hello", "de").await.unwrap(), "Hallo");
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad lang"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, "sk-test", 2);
        let err = client.translate("Hello", "xx").await.unwrap_err();
        assert!(matches!(
            err,
            TranslationError::Unavailable(ProviderFailure::Status { status: 400, .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_translation_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translations(&[])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, "sk-test", 2);
        assert_eq!(
            client.translate("Hello", "es").await.unwrap_err(),
            TranslationError::Unavailable(ProviderFailure::EmptyTranslation)
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, "sk-test", 2);
        assert!(matches!(
            client.translate("Hello", "es").await.unwrap_err(),
            TranslationError::Unavailable(ProviderFailure::MalformedResponse(_))
        ));
    }
}
