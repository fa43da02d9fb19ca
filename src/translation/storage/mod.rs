//! 存储模块
//!
//! 提供翻译结果的内存缓存。

pub mod cache;

pub use cache::{cache_key, text_key, CacheEntry, CacheStats, TranslationCache};
