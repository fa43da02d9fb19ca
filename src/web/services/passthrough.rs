//! 自动翻译的放行判断
//!
//! API、健康检查和静态资源请求不经过翻译，判断只看路径部分（不含查询串）。

/// 不翻译的静态资源扩展名
pub const STATIC_EXTENSIONS: &[&str] = &[
    "css", "js", "png", "jpg", "jpeg", "gif", "svg", "ico", "woff", "woff2",
];

/// 检查路径是否指向静态资源（大小写不敏感）
pub fn is_static_asset(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((_, ext)) => STATIC_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate)),
        None => false,
    }
}

/// 检查请求是否直接放行给内容处理器
pub fn should_bypass(path: &str) -> bool {
    path.starts_with("/api/") || path == "/health" || is_static_asset(path)
}

/// 从查询串中取出 `lang` 参数，没有时返回空字符串
pub fn lang_from_query(query: Option<&str>) -> String {
    query
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(name, _)| name == "lang")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}

/// 检查响应的 `Content-Type` 是否为 HTML
pub fn is_html(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
        .unwrap_or(false)
}
