//! 翻译模块
//!
//! - **language**: 目标语言协商
//! - **storage**: 带 TTL 的翻译缓存
//! - **core**: 翻译客户端和翻译服务
//! - **config**: 翻译服务配置
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use polyglot_proxy::network::PageFetcher;
//! use polyglot_proxy::translation::{ProviderConfig, TranslationCache, TranslationClient, TranslationService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProviderConfig::from_env()?;
//! let client = TranslationClient::from_config(&config)?;
//! let cache = Arc::new(TranslationCache::new());
//! let service = TranslationService::new(client, cache, PageFetcher::new(config.timeout)?);
//!
//! let html = service.translate_document("<p>Hello</p>", "es").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod language;
pub mod storage;

pub use config::ProviderConfig;
pub use self::core::{
    DeepSeekProvider, TranslationClient, TranslationProvider, TranslationService, UrlTranslation,
};
pub use error::{ProviderFailure, TranslationError, TranslationResult};
pub use storage::{CacheStats, TranslationCache};
