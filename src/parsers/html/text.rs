//! 文本节点的提取与替换
//!
//! 所有函数都以文档先序遍历的顺序处理文本节点，只计入去除空白后非空的节点。
//! `collect_translatable_texts` 和 `apply_text_replacements` 对同一份 HTML 分别解析，
//! 因为解析是确定性的，两次得到的节点顺序一一对应。

use async_trait::async_trait;
use html5ever::tendril::StrTendril;
use markup5ever_rcdom::{Handle, NodeData};

use crate::core::ProxyResult;
use crate::translation::error::TranslationResult;

use super::dom::parse_html;
use super::serializer::serialize_dom;
use super::walker::text_nodes;

/// 单段文本的翻译器
#[async_trait]
pub trait TextTranslator: Send + Sync {
    async fn translate_text(&self, text: &str, language: &str) -> TranslationResult<String>;
}

fn node_text(node: &Handle) -> Option<String> {
    match node.data {
        NodeData::Text { ref contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

/// 提取文档中的全部文本
///
/// 各文本节点去除首尾空白后以单个空格连接，包括 `<script>`、`<style>` 内的文本。
pub fn extract_text(html: &[u8]) -> ProxyResult<String> {
    let source = String::from_utf8_lossy(html);
    let dom = parse_html(&source);

    let parts: Vec<String> = text_nodes(&dom.document)
        .iter()
        .filter_map(node_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    Ok(parts.join(" ").trim().to_string())
}

/// 按文档顺序收集需要翻译的文本节点内容（保留原始空白）
pub fn collect_translatable_texts(html: &str) -> Vec<String> {
    let dom = parse_html(html);
    text_nodes(&dom.document)
        .iter()
        .filter_map(node_text)
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// 把替换内容写回文档并序列化
///
/// `replacements[i]` 对应第 i 个非空文本节点，`None` 表示保留原文。
pub fn apply_text_replacements(html: &str, replacements: &[Option<String>]) -> ProxyResult<String> {
    let dom = parse_html(html);

    let nodes = text_nodes(&dom.document);
    let translatable = nodes.iter().filter(|node| match node.data {
        NodeData::Text { ref contents } => !contents.borrow().trim().is_empty(),
        _ => false,
    });

    for (node, replacement) in translatable.zip(replacements) {
        if let (NodeData::Text { contents }, Some(text)) = (&node.data, replacement) {
            *contents.borrow_mut() = StrTendril::from(text.as_str());
        }
    }

    serialize_dom(&dom)
}

/// 整页翻译的结果和逐节点统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTranslation {
    pub html: String,
    pub translated_nodes: usize,
    pub failed_nodes: usize,
}

impl DocumentTranslation {
    /// 所有文本节点都翻译成功（没有文本节点也算）
    pub fn is_complete(&self) -> bool {
        self.failed_nodes == 0
    }
}

/// 翻译整个 HTML 文档并统计节点结果
///
/// 逐个翻译文本节点；单个节点失败时保留原文并继续。
/// 标签、属性、注释和 doctype 保持不变。
pub async fn translate_document_nodes<T>(
    html: &str,
    language: &str,
    translator: &T,
) -> ProxyResult<DocumentTranslation>
where
    T: TextTranslator + ?Sized,
{
    let texts = collect_translatable_texts(html);
    if texts.is_empty() {
        tracing::debug!("文档中没有可翻译的文本");
    }

    let mut replacements = Vec::with_capacity(texts.len());
    let mut failed_nodes = 0usize;
    for text in &texts {
        match translator.translate_text(text, language).await {
            Ok(translated) => replacements.push(Some(translated)),
            Err(e) => {
                failed_nodes += 1;
                tracing::debug!("文本节点翻译失败，保留原文: {}", e);
                replacements.push(None);
            }
        }
    }

    tracing::debug!(
        "文档翻译完成: {} 个文本节点，{} 个失败",
        texts.len(),
        failed_nodes
    );

    Ok(DocumentTranslation {
        html: apply_text_replacements(html, &replacements)?,
        translated_nodes: texts.len() - failed_nodes,
        failed_nodes,
    })
}

/// 翻译整个 HTML 文档，失败的节点保留原文
pub async fn translate_document<T>(
    html: &str,
    language: &str,
    translator: &T,
) -> ProxyResult<String>
where
    T: TextTranslator + ?Sized,
{
    Ok(translate_document_nodes(html, language, translator).await?.html)
}
