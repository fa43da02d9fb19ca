//! 缓存相关API处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::translation::CacheStats;
use crate::web::types::AppState;

/// 获取缓存统计信息
pub async fn get_cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// 清理缓存
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let cleared = state.cache.clear();
    tracing::info!("成功清理 {} 个缓存条目", cleared);
    Json(serde_json::json!({ "cleared": cleared }))
}
