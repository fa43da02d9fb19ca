//! Web 路由处理器
//!
//! `ProxyError` 在这里转换为 `{"error": ...}` JSON 响应。

pub mod api;
pub mod content;
pub mod middleware;

pub use api::*;
pub use content::*;
pub use middleware::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::core::ProxyError;

impl ProxyError {
    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamFetch(_) | ProxyError::Parse(_) | ProxyError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::Translation(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!("请求处理失败: {}", self);
        }
        let payload = serde_json::json!({ "error": self.to_string() });
        (status, Json(payload)).into_response()
    }
}
