use thiserror::Error;

use crate::translation::error::TranslationError;

/// 代理请求处理过程中可能出现的错误
///
/// 翻译服务相关的错误包装在 `Translation` 中，HTTP 状态码映射见
/// `web::handlers` 中的 `IntoResponse` 实现。
#[derive(Error, Debug)]
pub enum ProxyError {
    /// 缺少或无效的必填参数
    #[error("请求无效: {0}")]
    BadRequest(String),

    /// 目标页面无法访问或返回非成功状态
    #[error("获取页面失败: {0}")]
    UpstreamFetch(String),

    /// 翻译服务未配置或不可用
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// HTML 无法解析或序列化
    #[error("HTML 解析错误: {0}")]
    Parse(String),

    /// 监听或服务失败
    #[error("服务器错误: {0}")]
    Server(String),
}

impl ProxyError {
    /// 抓取页面阶段的错误一律归为 `UpstreamFetch`，提取失败也属于抓取步骤
    pub fn into_fetch_error(self) -> Self {
        match self {
            ProxyError::Parse(msg) => ProxyError::UpstreamFetch(msg),
            other => other,
        }
    }
}

pub type ProxyResult<T> = Result<T, ProxyError>;
