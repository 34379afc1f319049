//! 机器翻译 trait
//!
//! 核心逻辑只需要同步的 `translate(text) -> text`，源/目标语言在创建时固定。

use super::error::{MtError, MtResult};

/// 机器翻译提供者
pub trait Translator {
    /// 翻译一段文本
    ///
    /// 服务返回空结果时应返回原文；请求失败时返回 `Err`，由调用方决定跳过。
    fn translate(&self, text: &str) -> MtResult<String>;

    /// 提供者名称，用于日志
    fn provider_name(&self) -> &str;
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str) -> MtResult<String> {
        (**self).translate(text)
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

/// 去掉地区部分的语言代码：`en-US` → `en`
pub fn normalize_locale(locale: &str) -> String {
    locale.split(['-', '_']).next().unwrap_or(locale).to_lowercase()
}

/// 检查语言代码格式
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::ConfigError("语言代码为空".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::ConfigError(format!("语言代码包含非法字符: {}", locale)));
    }

    Ok(())
}

/// 服务返回空文本时回退为原文
pub(crate) fn or_original(translated: String, original: &str) -> String {
    if translated.trim().is_empty() {
        original.to_string()
    } else {
        translated
    }
}
