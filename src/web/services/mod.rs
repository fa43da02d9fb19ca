//! Web服务层模块
//!
//! 自动翻译中间件使用的决策逻辑

pub mod passthrough;

pub use passthrough::*;
