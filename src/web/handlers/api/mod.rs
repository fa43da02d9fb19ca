//! API 处理器

pub mod cache;
pub mod health;
pub mod translation;

pub use cache::*;
pub use health::*;
pub use translation::*;
