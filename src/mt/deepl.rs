//! DeepL 提供者
//!
//! `POST {base}/v2/translate`，密钥放在 `Authorization: DeepL-Auth-Key ...` 头中。
//! 以 `:fx` 结尾的是免费密钥，使用 `api-free.deepl.com`。

use super::error::{MtError, MtResult};
use super::translator::{or_original, validate_locale, Translator};
use serde::Deserialize;
use std::time::Duration;

const DEEPL_FREE_URL: &str = "https://api-free.deepl.com/v2/translate";
const DEEPL_PRO_URL: &str = "https://api.deepl.com/v2/translate";

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}

/// DeepL 翻译器
pub struct DeepLProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    source: String,
    target: String,
}

impl DeepLProvider {
    pub fn new(api_key: &str, source: &str, target: &str) -> MtResult<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(MtError::ConfigError(
                "DeepL 需要 API 密钥（设置 DEEPL_API_KEY 或使用 --deepl-key，免费密钥: https://www.deepl.com/pro-api）"
                    .to_string(),
            ));
        }
        validate_locale(source)?;
        validate_locale(target)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            source: source_code(source),
            target: target_code(target),
        })
    }

    /// `api_key` 为空时从环境变量 `DEEPL_API_KEY` 读取
    pub fn from_env(api_key: Option<&str>, source: &str, target: &str) -> MtResult<Self> {
        let key = match api_key {
            Some(key) if !key.trim().is_empty() => key.to_string(),
            _ => std::env::var("DEEPL_API_KEY").unwrap_or_default(),
        };
        Self::new(&key, source, target)
    }

    fn url(&self) -> &'static str {
        if self.api_key.ends_with(":fx") {
            DEEPL_FREE_URL
        } else {
            DEEPL_PRO_URL
        }
    }

    fn request_body(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "text": [text],
            "source_lang": self.source,
            "target_lang": self.target,
        })
    }
}

impl Translator for DeepLProvider {
    fn translate(&self, text: &str) -> MtResult<String> {
        let response = self
            .client
            .post(self.url())
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&self.request_body(text))
            .send()?;

        let status = response.status();
        if status.as_u16() == 456 {
            return Err(MtError::TranslationError("DeepL 额度已用完".to_string()));
        }

        let body: DeepLResponse = response
            .json()
            .map_err(|e| MtError::TranslationError(format!("无法解析响应 ({}): {}", status, e)))?;

        if !status.is_success() {
            let message = body.message.unwrap_or_else(|| status.to_string());
            return Err(MtError::TranslationError(message));
        }

        let translated = body
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .unwrap_or_default();
        Ok(or_original(translated, text))
    }

    fn provider_name(&self) -> &str {
        "DeepL"
    }
}

/// 源语言只用主语言代码：`en-US` → `EN`
fn source_code(locale: &str) -> String {
    super::translator::normalize_locale(locale).to_uppercase()
}

/// 目标语言保留地区变体；DeepL 要求英语和葡萄牙语带变体
fn target_code(locale: &str) -> String {
    let code = locale.replace('_', "-").to_uppercase();
    match code.as_str() {
        "EN" => "EN-US".to_string(),
        "PT" => "PT-PT".to_string(),
        _ => code,
    }
}
