//! # 网络模块
//!
//! 抓取远程页面。
//!
//! # 模块组织
//!
//! - `fetch` - 带超时的 HTTP 客户端，按响应字符集解码 HTML

pub mod fetch;

// Re-export commonly used items for convenience
pub use fetch::PageFetcher;
