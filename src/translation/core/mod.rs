//! 翻译系统核心模块
//!
//! ## 架构设计
//!
//! - **客户端层** (`client.rs`): 外部翻译服务抽象、DeepSeek 实现、截断与重试
//! - **服务层** (`service.rs`): 缓存优先的文本翻译、整页翻译和按 URL 翻译
//!
//! ## 模块依赖关系
//!
//! ```text
//! TranslationService (service.rs)
//!     ├── TranslationCache (storage/cache.rs)
//!     ├── PageFetcher (network/fetch.rs)
//!     └── TranslationClient (client.rs)
//!             └── dyn TranslationProvider
//!                     └── DeepSeekProvider
//! ```

pub mod client;
pub mod service;

/// 翻译客户端与服务抽象
pub use client::{DeepSeekProvider, TranslationClient, TranslationProvider};

/// 统一翻译服务 - 主要的对外接口
pub use service::{TranslationService, UrlTranslation};
