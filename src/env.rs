//! 统一的环境变量管理系统
//!
//! 每个变量是一个实现了 `EnvVar` 的单元结构体，集中定义名称、默认值、说明和解析规则。
//! `.env` 文件由 `main` 在启动时通过 `dotenv` 加载。

use std::env;
use std::time::Duration;

use thiserror::Error;

/// 环境变量解析错误
#[derive(Error, Debug, Clone)]
#[error("Environment variable '{variable}': {message}")]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 日志相关环境变量
pub mod logging {
    use super::*;

    /// 默认日志级别，`RUST_LOG` 存在时以其为准
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "PROXY_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 翻译服务相关环境变量
pub mod provider {
    use super::*;

    /// 翻译服务 API 密钥，为空时所有翻译调用都会返回未配置错误
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "DEEPSEEK_API_KEY";
        const DEFAULT: Option<String> = Some(String::new());
        const DESCRIPTION: &'static str = "Translation provider API key";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// 翻译服务地址
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "DEEPSEEK_API_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Translation provider endpoint URL";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::config::constants::DEFAULT_API_URL.to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }

    /// 单次调用超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "TRANSLATION_TIMEOUT_SECS";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(15));
        const DESCRIPTION: &'static str = "Provider and page fetch timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds = parse_bounded_u64(value, Self::NAME, 1, 300)?;
            Ok(Duration::from_secs(seconds))
        }
    }

    /// 可重试失败的额外尝试次数
    pub struct MaxRetries;
    impl EnvVar<u32> for MaxRetries {
        const NAME: &'static str = "TRANSLATION_MAX_RETRIES";
        const DEFAULT: Option<u32> = Some(2);
        const DESCRIPTION: &'static str = "Extra attempts for retryable provider failures";

        fn parse(value: &str) -> EnvResult<u32> {
            let retries = parse_bounded_u64(value, Self::NAME, 0, 10)?;
            Ok(retries as u32)
        }
    }

    /// 重试基础延迟
    pub struct RetryDelay;
    impl EnvVar<Duration> for RetryDelay {
        const NAME: &'static str = "TRANSLATION_RETRY_DELAY_MS";
        const DEFAULT: Option<Duration> = Some(Duration::from_millis(500));
        const DESCRIPTION: &'static str = "Base retry delay in milliseconds (doubles per attempt)";

        fn parse(value: &str) -> EnvResult<Duration> {
            let millis = parse_bounded_u64(value, Self::NAME, 0, 60_000)?;
            Ok(Duration::from_millis(millis))
        }
    }
}

/// 缓存相关环境变量
pub mod cache {
    use super::*;

    /// 缓存TTL
    pub struct Ttl;
    impl EnvVar<Duration> for Ttl {
        const NAME: &'static str = "TRANSLATION_CACHE_TTL_SECS";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(24 * 60 * 60));
        const DESCRIPTION: &'static str = "Cache TTL in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds = parse_bounded_u64(value, Self::NAME, 1, 86400 * 30)?;
            Ok(Duration::from_secs(seconds))
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "PROXY_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Web server bind address";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("0.0.0.0".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "PROXY_PORT";
        const DEFAULT: Option<u16> = Some(3080);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            match value.trim().parse::<u16>() {
                Ok(0) | Err(_) => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Must be a valid port number (1-65535)".to_string(),
                }),
                Ok(port) => Ok(port),
            }
        }
    }

    /// 上游源站，设置后 `GET /*` 反向代理到该地址
    pub struct UpstreamUrl;
    impl EnvVar<Option<String>> for UpstreamUrl {
        const NAME: &'static str = "PROXY_UPSTREAM_URL";
        const DEFAULT: Option<Option<String>> = Some(None);
        const DESCRIPTION: &'static str =
            "Upstream origin proxied by GET /* (unset: serve static dir)";

        fn parse(value: &str) -> EnvResult<Option<String>> {
            if value.trim().is_empty() {
                return Ok(None);
            }
            let url = parse_http_url(value, Self::NAME)?;
            Ok(Some(url.trim_end_matches('/').to_string()))
        }
    }

    /// 静态文件目录
    pub struct StaticDir;
    impl EnvVar<String> for StaticDir {
        const NAME: &'static str = "PROXY_STATIC_DIR";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Static files directory served when no upstream is set";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("static".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }
}

fn parse_http_url(value: &str, var_name: &str) -> EnvResult<String> {
    let url = value.trim();
    match url::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(url.to_string()),
        Ok(_) => Err(EnvError {
            variable: var_name.to_string(),
            message: "URL must start with http:// or https://".to_string(),
        }),
        Err(e) => Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Invalid URL: {}", e),
        }),
    }
}

fn parse_bounded_u64(value: &str, var_name: &str, min: u64, max: u64) -> EnvResult<u64> {
    let num: u64 = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid non-negative number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let rows: [(&str, &str); 11] = [
        (logging::LogLevel::NAME, logging::LogLevel::DESCRIPTION),
        (provider::ApiKey::NAME, provider::ApiKey::DESCRIPTION),
        (provider::ApiUrl::NAME, provider::ApiUrl::DESCRIPTION),
        (provider::Timeout::NAME, provider::Timeout::DESCRIPTION),
        (provider::MaxRetries::NAME, provider::MaxRetries::DESCRIPTION),
        (provider::RetryDelay::NAME, provider::RetryDelay::DESCRIPTION),
        (cache::Ttl::NAME, cache::Ttl::DESCRIPTION),
        (web::BindAddress::NAME, web::BindAddress::DESCRIPTION),
        (web::Port::NAME, web::Port::DESCRIPTION),
        (web::UpstreamUrl::NAME, web::UpstreamUrl::DESCRIPTION),
        (web::StaticDir::NAME, web::StaticDir::DESCRIPTION),
    ];

    let mut docs = String::from("# Environment Variables\n\n");
    for (name, description) in rows {
        docs.push_str(&format!("- `{}`: {}\n", name, description));
    }
    docs
}
