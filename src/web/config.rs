//! Web 服务器配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use std::time::Duration;

use crate::env::{EnvError, EnvResult, EnvVar};
use crate::translation::config::constants::DEFAULT_CACHE_TTL;

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
    /// 上游源站；未设置时改为提供静态文件
    pub upstream_url: Option<String>,
    /// 静态文件目录
    pub static_dir: String,
    /// 翻译缓存 TTL
    pub cache_ttl: Duration,
}

impl WebConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::{cache, web};

        Ok(Self {
            bind_addr: web::BindAddress::get()?,
            port: web::Port::get()?,
            upstream_url: web::UpstreamUrl::get()?,
            static_dir: web::StaticDir::get()?,
            cache_ttl: cache::Ttl::get()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.bind_addr.is_empty() {
            return Err(EnvError {
                variable: "PROXY_BIND_ADDRESS".to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        if self.port == 0 {
            return Err(EnvError {
                variable: "PROXY_PORT".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.upstream_url.is_none() && !std::path::Path::new(&self.static_dir).exists() {
            tracing::warn!("Static directory '{}' does not exist", self.static_dir);
        }

        Ok(())
    }

    /// 获取完整的监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 3080,
            upstream_url: None,
            static_dir: "static".to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}
