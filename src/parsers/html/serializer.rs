use std::collections::VecDeque;
use std::io;

use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::QualName;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::core::{ProxyError, ProxyResult};

/// 序列化文档
pub fn serialize_dom(dom: &RcDom) -> ProxyResult<String> {
    let mut buf: Vec<u8> = Vec::new();

    serialize(
        &mut buf,
        &DocumentHandle(dom.document.clone()),
        SerializeOpts::default(),
    )
    .map_err(|e| ProxyError::Parse(format!("无法序列化 DOM: {}", e)))?;

    String::from_utf8(buf).map_err(|e| ProxyError::Parse(e.to_string()))
}

/// 可序列化的文档句柄
///
/// 与 `SerializableHandle` 的输出一致，另外会写出 `<template>` 的内容片段。
struct DocumentHandle(Handle);

enum SerializeOp {
    Open(Handle),
    Close(QualName),
}

impl Serialize for DocumentHandle {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let mut ops = VecDeque::new();
        match traversal_scope {
            TraversalScope::IncludeNode => ops.push_back(SerializeOp::Open(self.0.clone())),
            TraversalScope::ChildrenOnly(_) => ops.extend(
                self.0
                    .children
                    .borrow()
                    .iter()
                    .map(|h| SerializeOp::Open(h.clone())),
            ),
        }

        while let Some(op) = ops.pop_front() {
            match op {
                SerializeOp::Open(handle) => match handle.data {
                    NodeData::Element {
                        ref name,
                        ref attrs,
                        ref template_contents,
                        ..
                    } => {
                        serializer.start_elem(
                            name.clone(),
                            attrs.borrow().iter().map(|at| (&at.name, &at.value[..])),
                        )?;

                        ops.push_front(SerializeOp::Close(name.clone()));
                        for child in handle.children.borrow().iter().rev() {
                            ops.push_front(SerializeOp::Open(child.clone()));
                        }
                        if let Some(ref contents) = *template_contents.borrow() {
                            for child in contents.children.borrow().iter().rev() {
                                ops.push_front(SerializeOp::Open(child.clone()));
                            }
                        }
                    }
                    NodeData::Doctype { ref name, .. } => serializer.write_doctype(name)?,
                    NodeData::Text { ref contents } => serializer.write_text(&contents.borrow())?,
                    NodeData::Comment { ref contents } => serializer.write_comment(contents)?,
                    NodeData::ProcessingInstruction {
                        ref target,
                        ref contents,
                    } => serializer.write_processing_instruction(target, contents)?,
                    NodeData::Document => {
                        for child in handle.children.borrow().iter().rev() {
                            ops.push_front(SerializeOp::Open(child.clone()));
                        }
                    }
                },
                SerializeOp::Close(name) => serializer.end_elem(name)?,
            }
        }

        Ok(())
    }
}
