//! Web 服务器模块
//!
//! 翻译代理的 HTTP 入口：按 URL 翻译的 API、缓存管理、健康检查，
//! 以及包裹在内容处理器外层的自动翻译中间件。

pub mod config;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::core::{ProxyError, ProxyResult};
use crate::network::PageFetcher;
use crate::translation::{ProviderConfig, TranslationCache, TranslationClient, TranslationService};

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    provider: ProviderConfig,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, provider: ProviderConfig) -> Self {
        Self { config, provider }
    }

    /// 组装共享状态：缓存、翻译客户端、抓取器
    pub fn build_state(&self) -> ProxyResult<Arc<AppState>> {
        let cache = Arc::new(TranslationCache::with_ttl(self.config.cache_ttl));
        let client = TranslationClient::from_config(&self.provider)?;
        let fetcher = PageFetcher::new(self.provider.timeout)?;
        let service = Arc::new(TranslationService::new(client, cache, fetcher));

        Ok(Arc::new(AppState::new(
            service,
            self.config.upstream_url.clone(),
            self.config.static_dir.clone(),
        )))
    }

    /// 启动 Web 服务器，收到 Ctrl-C 或 SIGTERM 后优雅退出
    pub async fn start(&self) -> ProxyResult<()> {
        let app_state = self.build_state()?;

        if !app_state.service.is_configured() {
            tracing::warn!("未设置 DEEPSEEK_API_KEY，翻译请求将返回 503，页面按原文返回");
        }
        match &self.config.upstream_url {
            Some(upstream) => tracing::info!("上游源站: {}", upstream),
            None => tracing::info!("静态目录: {}", self.config.static_dir),
        }

        let app = create_router(app_state);

        let listener = TcpListener::bind(self.config.listen_address())
            .await
            .map_err(|e| ProxyError::Server(format!("Failed to bind server: {}", e)))?;

        tracing::info!("Web server starting at http://{}", self.config.listen_address());

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ProxyError::Server(format!("Server error: {}", e)))?;

        tracing::info!("Web server stopped");
        Ok(())
    }
}

/// 创建路由器
///
/// 除 API 路由外的请求落到内容处理器；自动翻译中间件作用于全部路由，
/// 由它自己放行 API 和静态资源。
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let routes = create_routes();

    let routes = if app_state.upstream_url.is_some() {
        routes.fallback(proxy_upstream)
    } else {
        routes.fallback_service(ServeDir::new(&app_state.static_dir))
    };

    routes
        .layer(from_fn_with_state(Arc::clone(&app_state), auto_translate))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("收到退出信号，正在关闭");
}
