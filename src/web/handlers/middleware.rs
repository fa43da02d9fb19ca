//! 自动翻译中间件
//!
//! 包裹内容处理器。对非默认语言的 HTML 页面请求：先查缓存，未命中时调用内层处理器、
//! 翻译响应体并写入缓存。这个中间件从不向客户端暴露翻译错误：
//!
//! - 全部节点成功：返回译文，2xx 响应写入页面缓存
//! - 部分节点失败：返回部分译文，不写页面缓存
//! - 没有节点成功或序列化失败：返回原始响应体，不写页面缓存

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{
        header::{ACCEPT_LANGUAGE, CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::parsers::html::{charset_from_content_type, decode_html_bytes};
use crate::translation::language;
use crate::web::services::passthrough::{is_html, lang_from_query, should_bypass};
use crate::web::types::AppState;

const HTML_UTF8: &str = "text/html; charset=utf-8";

/// 自动翻译出站 HTML
pub async fn auto_translate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let accept_language = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let language = language::resolve(&lang_from_query(request.uri().query()), accept_language);

    if should_bypass(request.uri().path()) || language::is_default(&language) {
        return next.run(request).await;
    }

    let cache_key = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if let Some(cached) = state.cache.get(&cache_key, &language) {
        tracing::debug!("自动翻译命中缓存: {} ({})", cache_key, language);
        return (StatusCode::OK, [(CONTENT_TYPE, HTML_UTF8)], cached).into_response();
    }

    let response = next.run(request).await;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    if !is_html(content_type.as_deref()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("读取响应体失败 {}: {}", cache_key, e);
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let charset = content_type.as_deref().and_then(charset_from_content_type);
    let html = decode_html_bytes(&bytes, charset.as_deref());

    let document = match state.service.translate_document_nodes(&html, &language).await {
        Ok(document) if document.translated_nodes > 0 || document.is_complete() => document,
        Ok(document) => {
            tracing::warn!(
                "页面翻译失败，返回原文 {}: {} 个节点全部失败",
                cache_key,
                document.failed_nodes
            );
            return Response::from_parts(parts, Body::from(bytes));
        }
        Err(e) => {
            tracing::warn!("页面翻译失败，返回原文 {}: {}", cache_key, e);
            return Response::from_parts(parts, Body::from(bytes));
        }
    };

    if !document.is_complete() {
        tracing::warn!(
            "页面部分翻译 {} ({}): {} 个节点失败，不写入缓存",
            cache_key,
            language,
            document.failed_nodes
        );
    } else if parts.status.is_success() {
        state.cache.put(&cache_key, &language, document.html.clone());
    }
    tracing::info!("已翻译页面: {} ({})", cache_key, language);

    parts.headers.insert(CONTENT_TYPE, HeaderValue::from_static(HTML_UTF8));
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(document.html))
}
