//! 翻译模块统一错误处理
//!
//! `TranslationError` 是调用方看到的错误；`ProviderFailure` 记录外部翻译服务失败的具体原因，
//! 并决定是否值得重试。

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslationError {
    /// 没有配置 API 密钥
    #[error("翻译服务未配置")]
    NotConfigured,

    /// 翻译服务调用失败
    #[error("翻译服务不可用: {0}")]
    Unavailable(#[from] ProviderFailure),
}

/// 外部翻译服务失败原因
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderFailure {
    /// 网络错误
    #[error("网络错误: {0}")]
    Transport(String),

    /// 请求超时
    #[error("请求超时")]
    Timeout,

    /// 非成功状态码
    #[error("服务返回状态码 {status}: {body}")]
    Status { status: u16, body: String },

    /// 响应无法解析
    #[error("响应格式无效: {0}")]
    MalformedResponse(String),

    /// 响应中没有译文
    #[error("响应中没有译文")]
    EmptyTranslation,
}

impl ProviderFailure {
    /// 检查错误是否可重试
    ///
    /// 网络错误、超时、429 和 5xx 可以重试，其余视为确定性失败。
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderFailure::Transport(_) => true,
            ProviderFailure::Timeout => true,
            ProviderFailure::Status { status, .. } => *status == 429 || *status >= 500,
            ProviderFailure::MalformedResponse(_) => false,
            ProviderFailure::EmptyTranslation => false,
        }
    }
}

impl From<reqwest::Error> for ProviderFailure {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ProviderFailure::Timeout
        } else if error.is_decode() {
            ProviderFailure::MalformedResponse(error.to_string())
        } else {
            ProviderFailure::Transport(error.to_string())
        }
    }
}

/// 翻译结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_failures() {
        assert!(ProviderFailure::Transport("reset".to_string()).is_retryable());
        assert!(ProviderFailure::Timeout.is_retryable());
        assert!(ProviderFailure::Status { status: 429, body: String::new() }.is_retryable());
        assert!(ProviderFailure::Status { status: 503, body: String::new() }.is_retryable());
    }

    #[test]
    fn test_non_retryable_failures() {
        assert!(!ProviderFailure::Status { status: 400, body: String::new() }.is_retryable());
        assert!(!ProviderFailure::Status { status: 401, body: String::new() }.is_retryable());
        assert!(!ProviderFailure::MalformedResponse("eof".to_string()).is_retryable());
        assert!(!ProviderFailure::EmptyTranslation.is_retryable());
    }

    #[test]
    fn test_failure_wraps_into_unavailable() {
        let err: TranslationError = ProviderFailure::Timeout.into();
        assert_eq!(err, TranslationError::Unavailable(ProviderFailure::Timeout));
        assert!(err.to_string().contains("请求超时"));
    }
}
