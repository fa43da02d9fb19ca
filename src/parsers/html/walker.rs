//! DOM遍历器模块
//!
//! 先序遍历整棵树，使用显式栈而非递归，深层嵌套的文档不会耗尽调用栈。
//! `<template>` 的内容片段在模板元素之后、其子节点之前访问。

use markup5ever_rcdom::{Handle, NodeData};

/// 先序遍历，对每个节点调用 `visit`
pub fn walk_preorder(root: &Handle, mut visit: impl FnMut(&Handle)) {
    let mut stack: Vec<Handle> = vec![root.clone()];

    while let Some(node) = stack.pop() {
        visit(&node);

        // 逆序压栈，保证按文档顺序弹出
        for child in node.children.borrow().iter().rev() {
            stack.push(child.clone());
        }

        if let NodeData::Element {
            ref template_contents,
            ..
        } = node.data
        {
            if let Some(ref contents) = *template_contents.borrow() {
                stack.push(contents.clone());
            }
        }
    }
}

/// 按文档顺序收集所有文本节点
pub fn text_nodes(root: &Handle) -> Vec<Handle> {
    let mut nodes = Vec::new();
    walk_preorder(root, |node| {
        if let NodeData::Text { .. } = node.data {
            nodes.push(node.clone());
        }
    });
    nodes
}
