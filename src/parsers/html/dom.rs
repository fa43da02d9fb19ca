use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::RcDom;

/// 将 HTML 文本解析为 DOM
///
/// html5ever 按 HTML 标准容错解析，不会失败；片段会被补全为完整文档。
pub fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// 按字符集把 HTML 字节解码为字符串
///
/// 未知或缺失的字符集按 UTF-8 处理，非法字节被替换。
pub fn decode_html_bytes(data: &[u8], charset: Option<&str>) -> String {
    match charset.and_then(|label| Encoding::for_label(label.trim().as_bytes())) {
        Some(encoding) => {
            let (decoded, _, had_errors) = encoding.decode(data);
            if had_errors {
                tracing::debug!("以 {} 解码时遇到非法字节", encoding.name());
            }
            decoded.into_owned()
        }
        None => String::from_utf8_lossy(data).into_owned(),
    }
}

/// 从 `Content-Type` 头中取出 charset 参数
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches('"');
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}
