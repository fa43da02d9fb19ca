//! 翻译缓存
//!
//! 进程内的 键 → (内容, 过期时间) 存储。所有读写共用一把读写锁，读并发、写独占，
//! 锁内不做任何 I/O。过期条目惰性失效：`get` 视其为不存在但不删除，
//! 直到被同键写入覆盖或调用 `clear`。除 TTL 外没有淘汰策略，条目数量随键空间增长。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::translation::config::constants;

/// 缓存条目
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub content: String,
    pub expiration: Instant,
}

impl CacheEntry {
    /// 检查是否过期
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expiration
    }
}

/// 缓存统计信息
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// 驻留条目数（包含已过期但尚未覆盖的）
    pub entries: usize,
    pub expired_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// 计算缓存命中率
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// 翻译缓存
///
/// 通过 `Arc<TranslationCache>` 在请求之间共享。
#[derive(Debug)]
pub struct TranslationCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TranslationCache {
    /// 创建新的翻译缓存（TTL 24小时）
    pub fn new() -> Self {
        Self::with_ttl(constants::DEFAULT_CACHE_TTL)
    }

    /// 使用指定 TTL 创建缓存
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 写入缓存，覆盖同键的旧条目
    pub fn put(&self, primary_key: &str, language: &str, content: impl Into<String>) {
        let key = cache_key(primary_key, language);
        let entry = CacheEntry {
            content: content.into(),
            expiration: Instant::now() + self.ttl,
        };

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, entry);
    }

    /// 读取缓存，不存在或已过期时返回 `None`
    pub fn get(&self, primary_key: &str, language: &str) -> Option<String> {
        let key = cache_key(primary_key, language);
        let now = Instant::now();

        let found = {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            entries
                .get(&key)
                .filter(|entry| !entry.is_expired(now))
                .map(|entry| entry.content.clone())
        };

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("缓存命中: {}", key);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("缓存未命中: {}", key);
        }
        found
    }

    /// 获取统计信息
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());

        CacheStats {
            entries: entries.len(),
            expired_entries: entries.values().filter(|e| e.is_expired(now)).count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// 清空缓存，返回被删除的条目数
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// 获取缓存大小
    pub fn size(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

/// 生成缓存键，语言非空时追加 `|<language>`
pub fn cache_key(primary_key: &str, language: &str) -> String {
    if language.is_empty() {
        primary_key.to_string()
    } else {
        format!("{}|{}", primary_key, language)
    }
}

/// 原始文本的缓存主键：`text_<language>_<blake3>`
pub fn text_key(text: &str, language: &str) -> String {
    format!("text_{}_{}", language, blake3::hash(text.as_bytes()).to_hex())
}
