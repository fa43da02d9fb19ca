//! # Polyglot Proxy
//!
//! 一个翻译反向代理：拦截出站的 HTML 响应，提取文本节点并交给外部翻译服务，
//! 再把译文写回文档；同时提供按 URL 翻译的 API。翻译结果按源 URL/文本和目标语言缓存。
//!
//! ## 模块组织
//!
//! - `core` - 顶层错误类型
//! - `env` - 类型安全的环境变量
//! - `parsers` - HTML 解析、遍历、文本提取与替换
//! - `network` - 抓取远程页面
//! - `translation` - 语言协商、缓存、翻译客户端与翻译服务
//! - `web` - axum 服务器、路由、处理器与自动翻译中间件

pub mod core;
pub mod env;
pub mod network;
pub mod parsers;
pub mod translation;
pub mod web;

// Re-export commonly used items for convenience
pub use self::core::{ProxyError, ProxyResult};
pub use parsers::html::{extract_text, translate_document};
pub use translation::{TranslationCache, TranslationClient, TranslationService};
pub use web::{WebConfig, WebServer};
