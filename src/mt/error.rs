use thiserror::Error;

/// 机器翻译错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// 配置错误（语言代码、API 地址、密钥等）
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 网络请求失败
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 服务返回错误或无法解析的响应
    #[error("Translation error: {0}")]
    TranslationError(String),
}

#[cfg(feature = "mt")]
impl From<reqwest::Error> for MtError {
    fn from(e: reqwest::Error) -> Self {
        MtError::NetworkError(e.to_string())
    }
}

/// 机器翻译结果类型
pub type MtResult<T> = Result<T, MtError>;
