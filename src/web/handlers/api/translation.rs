//! 按 URL 翻译的 API 处理器

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::ACCEPT_LANGUAGE, HeaderMap},
    response::Json,
};

use crate::core::ProxyResult;
use crate::translation::{language, UrlTranslation};
use crate::web::types::{AppState, TranslateQuery};

/// `GET /api/translate?url=&lang=`
///
/// 目标语言取 `lang` 参数，缺省时按 `Accept-Language` 协商。
pub async fn translate_url(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TranslateQuery>,
    headers: HeaderMap,
) -> ProxyResult<Json<UrlTranslation>> {
    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let language = language::resolve(&query.lang, accept_language);

    tracing::info!("翻译 URL: {} -> {}", query.url, language);

    let result = state.service.translate_url(&query.url, &language).await?;
    Ok(Json(result))
}
