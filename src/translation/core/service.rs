//! 翻译服务核心实现
//!
//! 在翻译客户端之外加上缓存：
//!
//! - `translate_text`: 以 `text_<lang>_<hash>` 为键的缓存优先翻译
//! - `translate_document` / `translate_document_nodes`: 逐个文本节点经 `translate_text` 翻译整页 HTML
//! - `translate_url`: 抓取页面、提取文本并翻译，结果按 `(url, lang)` 缓存

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::core::{ProxyError, ProxyResult};
use crate::network::PageFetcher;
use crate::parsers::html::{self, DocumentTranslation, TextTranslator};
use crate::translation::{
    core::client::TranslationClient,
    error::TranslationResult,
    storage::cache::{text_key, TranslationCache},
};

/// 按 URL 翻译的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlTranslation {
    pub cached: bool,
    /// 命中缓存时与 `translated` 相同，原文不入缓存
    pub original: String,
    pub translated: String,
    pub language: String,
}

/// 统一的翻译服务
///
/// 可在请求之间共享（`Arc<TranslationService>`），缓存与 Web 层共用同一个实例。
pub struct TranslationService {
    client: TranslationClient,
    cache: Arc<TranslationCache>,
    fetcher: PageFetcher,
}

impl TranslationService {
    pub fn new(
        client: TranslationClient,
        cache: Arc<TranslationCache>,
        fetcher: PageFetcher,
    ) -> Self {
        Self {
            client,
            cache,
            fetcher,
        }
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// 缓存优先的文本翻译
    ///
    /// 相同文本和语言在 TTL 内只调用一次翻译服务。
    pub async fn translate_text(&self, text: &str, language: &str) -> TranslationResult<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let key = text_key(text, language);
        if let Some(cached) = self.cache.get(&key, "") {
            return Ok(cached);
        }

        let translated = self.client.translate(text, language).await?;
        self.cache.put(&key, "", translated.clone());
        Ok(translated)
    }

    /// 翻译整个 HTML 文档，失败的节点保留原文
    pub async fn translate_document(&self, document: &str, language: &str) -> ProxyResult<String> {
        html::translate_document(document, language, self).await
    }

    /// 同 `translate_document`，另外返回成功和失败的节点数
    pub async fn translate_document_nodes(
        &self,
        document: &str,
        language: &str,
    ) -> ProxyResult<DocumentTranslation> {
        html::translate_document_nodes(document, language, self).await
    }

    /// 抓取并翻译指定 URL 的文本内容
    pub async fn translate_url(&self, url: &str, language: &str) -> ProxyResult<UrlTranslation> {
        let url = validate_url(url)?;

        if let Some(cached) = self.cache.get(url, language) {
            tracing::info!("URL 翻译命中缓存: {} ({})", url, language);
            return Ok(UrlTranslation {
                cached: true,
                original: cached.clone(),
                translated: cached,
                language: language.to_string(),
            });
        }

        let page = self
            .fetcher
            .fetch_html(url)
            .await
            .map_err(ProxyError::into_fetch_error)?;
        let original = html::extract_text(page.as_bytes()).map_err(ProxyError::into_fetch_error)?;

        let translated = self.translate_text(&original, language).await?;
        self.cache.put(url, language, translated.clone());

        tracing::info!(
            "URL 翻译完成: {} ({}), {} 字符",
            url,
            language,
            original.chars().count()
        );

        Ok(UrlTranslation {
            cached: false,
            original,
            translated,
            language: language.to_string(),
        })
    }
}

#[async_trait]
impl TextTranslator for TranslationService {
    async fn translate_text(&self, text: &str, language: &str) -> TranslationResult<String> {
        TranslationService::translate_text(self, text, language).await
    }
}

/// 校验 URL 参数：必须是绝对的 http(s) 地址
fn validate_url(url: &str) -> ProxyResult<&str> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ProxyError::BadRequest("URL is required".to_string()));
    }

    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(url),
        Ok(parsed) => Err(ProxyError::BadRequest(format!(
            "不支持的协议: {}",
            parsed.scheme()
        ))),
        Err(e) => Err(ProxyError::BadRequest(format!("无效的 URL '{}': {}", url, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::core::client::TranslationProvider;
    use crate::translation::error::{ProviderFailure, TranslationError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingProvider {
        calls: AtomicUsize,
        configured: bool,
    }

    #[async_trait]
    impl TranslationProvider for CountingProvider {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn translate(
            &self,
            text: &str,
            target_language: &str,
        ) -> Result<String, ProviderFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}:{}", target_language, text))
        }
    }

    fn service(configured: bool) -> (TranslationService, Arc<CountingProvider>) {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            configured,
        });
        let client = TranslationClient::new(provider.clone(), 0, Duration::ZERO);
        let service = TranslationService::new(
            client,
            Arc::new(TranslationCache::new()),
            PageFetcher::new(Duration::from_secs(5)).unwrap(),
        );
        (service, provider)
    }

    #[tokio::test]
    async fn test_translate_text_is_cached() {
        let (service, provider) = service(true);

        let first = service.translate_text("Hello", "es").await.unwrap();
        let second = service.translate_text("Hello", "es").await.unwrap();

        assert_eq!(first, "es:Hello");
        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        service.translate_text("Hello", "fr").await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_blank_text_is_not_cached() {
        let (service, provider) = service(true);
        assert_eq!(service.translate_text("  ", "es").await.unwrap(), "  ");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.cache().size(), 0);
    }

    #[tokio::test]
    async fn test_not_configured_is_not_cached() {
        let (service, _) = service(false);
        let err = service.translate_text("Hello", "es").await.unwrap_err();
        assert_eq!(err, TranslationError::NotConfigured);
        assert_eq!(service.cache().size(), 0);
    }

    #[tokio::test]
    async fn test_repeated_phrases_hit_provider_once() {
        let (service, provider) = service(true);
        let out = service
            .translate_document("<li>Yes</li><li>No</li><li>Yes</li>", "pt")
            .await
            .unwrap();

        assert!(out.contains("<li>pt:Yes</li><li>pt:No</li><li>pt:Yes</li>"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_translate_url_rejects_bad_urls() {
        let (service, _) = service(true);

        for url in ["", "   ", "not a url", "ftp://example.com/file"] {
            let err = service.translate_url(url, "es").await.unwrap_err();
            assert!(matches!(err, ProxyError::BadRequest(_)), "url: {:?}", url);
        }
    }

    #[tokio::test]
    async fn test_translate_url_serves_cache_hit() {
        let (service, provider) = service(true);
        service.cache().put("https://example.com/", "ja", "キャッシュ");

        let result = service.translate_url("https://example.com/", "ja").await.unwrap();
        assert_eq!(
            result,
            UrlTranslation {
                cached: true,
                original: "キャッシュ".to_string(),
                translated: "キャッシュ".to_string(),
                language: "ja".to_string(),
            }
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
