//! 目标语言协商
//!
//! 显式指定的语言原样使用；否则按 `Accept-Language` 中出现的顺序选出第一个受支持的语言。

/// 默认语言，不触发翻译
pub const DEFAULT_LANGUAGE: &str = "en";

/// 受支持的语言
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "pt", "es", "fr", "de", "it", "ja", "zh", "ru"];

/// 检查语言代码是否受支持
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

/// 检查是否为默认语言
pub fn is_default(code: &str) -> bool {
    code == DEFAULT_LANGUAGE
}

/// 解析目标语言
///
/// 权重 `q` 被忽略，以头部中的顺序为准。没有匹配时返回 `en`。
pub fn resolve(explicit_override: &str, accept_language: &str) -> String {
    if !explicit_override.is_empty() {
        return explicit_override.to_string();
    }

    for candidate in accept_language.split(',') {
        let tag = candidate.split(';').next().unwrap_or_default().trim();
        let code: String = tag.to_lowercase().chars().take(2).collect();
        if is_supported(&code) {
            return code;
        }
    }

    DEFAULT_LANGUAGE.to_string()
}
