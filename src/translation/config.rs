//! 翻译配置
//!
//! 外部翻译服务的全部设置都通过 `ProviderConfig` 经构造函数传入，不读取全局状态。

use std::time::Duration;

use crate::env::{provider, EnvResult, EnvVar};

/// 翻译配置常量
pub mod constants {
    use std::time::Duration;

    /// 提交给翻译服务的最大字符数，超出部分被截断
    pub const MAX_TEXT_LENGTH: usize = 5000;

    pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/translate";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
    pub const DEFAULT_MAX_RETRIES: u32 = 2;
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

    // 缓存设置
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60); // 24小时
}

/// 翻译服务配置
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API 密钥，为空表示未配置
    pub api_key: String,
    pub api_url: String,
    /// 单次请求超时
    pub timeout: Duration,
    /// 可重试失败的额外尝试次数
    pub max_retries: u32,
    /// 重试基础延迟，每次重试翻倍
    pub retry_delay: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: constants::DEFAULT_API_URL.to_string(),
            timeout: constants::DEFAULT_TIMEOUT,
            max_retries: constants::DEFAULT_MAX_RETRIES,
            retry_delay: constants::DEFAULT_RETRY_DELAY,
        }
    }
}

impl ProviderConfig {
    /// 从环境变量加载
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            api_key: provider::ApiKey::get()?,
            api_url: provider::ApiUrl::get()?,
            timeout: provider::Timeout::get()?,
            max_retries: provider::MaxRetries::get()?,
            retry_delay: provider::RetryDelay::get()?,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
