// 集成测试公共模块
//
// 提供可计数的翻译服务桩、应用组装和请求辅助函数

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use polyglot_proxy::network::PageFetcher;
use polyglot_proxy::translation::{
    ProviderFailure, TranslationCache, TranslationClient, TranslationProvider, TranslationService,
};
use polyglot_proxy::web::{create_router, AppState};

/// 翻译服务桩的行为
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum StubMode {
    /// 返回大写文本
    Uppercase,
    /// 每次调用都失败
    Fail(ProviderFailure),
    /// 前 n 次调用超时，之后返回大写文本
    FailFirst(usize),
    /// 没有配置密钥
    NotConfigured,
}

/// 记录调用次数的翻译服务桩
#[allow(dead_code)]
pub struct StubProvider {
    mode: StubMode,
    calls: AtomicUsize,
    languages: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubProvider {
    pub fn new(mode: StubMode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        })
    }

    pub fn uppercase() -> Arc<Self> {
        Self::new(StubMode::Uppercase)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn languages(&self) -> Vec<String> {
        self.languages.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for StubProvider {
    fn is_configured(&self) -> bool {
        !matches!(self.mode, StubMode::NotConfigured)
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ProviderFailure> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.languages.lock().unwrap().push(target_language.to_string());
        match &self.mode {
            StubMode::Uppercase => Ok(text.to_uppercase()),
            StubMode::FailFirst(n) if call <= *n => Err(ProviderFailure::Timeout),
            StubMode::FailFirst(_) => Ok(text.to_uppercase()),
            StubMode::Fail(failure) => Err(failure.clone()),
            StubMode::NotConfigured => unreachable!("client checks configuration first"),
        }
    }
}

/// 使用桩服务和指定缓存创建翻译服务
#[allow(dead_code)]
pub fn service_with_cache(
    provider: Arc<StubProvider>,
    cache: Arc<TranslationCache>,
) -> Arc<TranslationService> {
    let client = TranslationClient::new(provider, 0, Duration::ZERO);
    let fetcher = PageFetcher::new(Duration::from_secs(5)).unwrap();
    Arc::new(TranslationService::new(client, cache, fetcher))
}

#[allow(dead_code)]
pub fn service(provider: Arc<StubProvider>) -> Arc<TranslationService> {
    service_with_cache(provider, Arc::new(TranslationCache::new()))
}

/// 静态文件目录
#[allow(dead_code)]
pub fn fixtures_dir() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures").to_string()
}

/// 组装路由器：有上游时反向代理，否则提供测试用静态目录
#[allow(dead_code)]
pub fn app(provider: Arc<StubProvider>, upstream_url: Option<String>) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(service(provider), upstream_url, fixtures_dir()));
    (create_router(Arc::clone(&state)), state)
}

/// 测试响应
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// 发送请求
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// 发送 GET 请求，可附带 `Accept-Language`
#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str, accept_language: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = accept_language {
        builder = builder.header("accept-language", value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}
