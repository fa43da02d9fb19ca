//! 内容处理器
//!
//! 自动翻译中间件包裹的底层处理器：配置了上游源站时反向代理 `GET` 请求，
//! 否则由 `ServeDir` 提供静态文件（见 `web::create_router`）。

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::web::types::AppState;

/// 反向代理到上游源站
pub async fn proxy_upstream(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let Some(base_url) = state.upstream_url.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if request.method() != Method::GET {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let target = format!("{}{}", base_url, path_and_query);

    let upstream = match state.service.fetcher().http().get(&target).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("上游请求失败 {}: {}", target, e);
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let status = upstream.status();
    let mut builder = Response::builder().status(status);
    // 只转发与内容相关的响应头
    for name in [
        header::CONTENT_TYPE,
        header::CACHE_CONTROL,
        header::LAST_MODIFIED,
        header::ETAG,
    ] {
        if let Some(value) = upstream.headers().get(&name) {
            builder = builder.header(name, value);
        }
    }

    let body = match upstream.bytes().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("读取上游响应失败 {}: {}", target, e);
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    tracing::debug!("代理 {} -> {}", target, status.as_u16());

    builder
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response())
}
