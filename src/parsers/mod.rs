//! # 解析器模块
//!
//! 这个模块包含处理 HTML 文档的所有功能：
//!
//! - HTML 解析与字符集解码
//! - DOM 先序遍历
//! - 文本节点提取与替换
//! - 序列化
//!
//! # 模块组织
//!
//! - `html` - HTML 文档解析、遍历、文本处理、序列化

pub mod html;

// Re-export commonly used items for convenience
pub use html::{
    decode_html_bytes, extract_text, parse_html, serialize_dom, translate_document, TextTranslator,
};
