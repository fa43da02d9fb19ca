//! 健康检查

use axum::response::Json;

/// 健康检查
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
