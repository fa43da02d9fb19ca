//! HTML解析和处理模块
//!
//! - `dom`: 解析与字符集解码
//! - `walker`: 基于显式栈的先序遍历
//! - `text`: 文本节点的提取、收集、替换与整页翻译
//! - `serializer`: 序列化功能
//!
//! `RcDom` 句柄不是 `Send`，所以涉及异步翻译的流程分两次解析：
//! 第一次同步收集文本，翻译完成后在第二次解析的结果上按相同顺序替换。

pub mod dom;
pub mod serializer;
pub mod text;
pub mod walker;

pub use dom::{charset_from_content_type, decode_html_bytes, parse_html};
pub use serializer::serialize_dom;
pub use text::{
    apply_text_replacements, collect_translatable_texts, extract_text, translate_document,
    translate_document_nodes, DocumentTranslation, TextTranslator,
};
pub use walker::{text_nodes, walk_preorder};
