//! Web 模块的数据类型定义

use std::sync::Arc;

use serde::Deserialize;

use crate::translation::{TranslationCache, TranslationService};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranslationService>,
    /// 与 `service` 共用的缓存实例
    pub cache: Arc<TranslationCache>,
    /// 上游源站，设置后 `GET /*` 反向代理到这里
    pub upstream_url: Option<String>,
    /// 未设置上游时提供的静态目录
    pub static_dir: String,
}

impl AppState {
    pub fn new(
        service: Arc<TranslationService>,
        upstream_url: Option<String>,
        static_dir: impl Into<String>,
    ) -> Self {
        Self {
            cache: Arc::clone(service.cache()),
            service,
            upstream_url,
            static_dir: static_dir.into(),
        }
    }
}

/// 按 URL 翻译的请求参数
#[derive(Debug, Default, Deserialize)]
pub struct TranslateQuery {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub lang: String,
}
