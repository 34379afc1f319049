//! LibreTranslate 提供者
//!
//! `POST {endpoint}/translate`，请求体为 JSON，响应中的 `translatedText` 为译文。

use super::error::{MtError, MtResult};
use super::translator::{normalize_locale, or_original, validate_locale, Translator};
use serde::Deserialize;
use std::time::Duration;

/// 默认服务地址
pub const DEFAULT_LIBRETRANSLATE_URL: &str = "https://libretranslate.com";

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

/// LibreTranslate 翻译器
pub struct LibreTranslateProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: Option<String>,
    source: String,
    target: String,
}

impl LibreTranslateProvider {
    pub fn new(
        endpoint: &str,
        api_key: Option<String>,
        source: &str,
        target: &str,
    ) -> MtResult<Self> {
        validate_locale(source)?;
        validate_locale(target)?;

        let endpoint = endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(MtError::ConfigError("LibreTranslate 地址为空".to_string()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            source: normalize_locale(source),
            target: normalize_locale(target),
        })
    }

    /// 从环境变量读取地址（`LIBRETRANSLATE_URL`）和密钥（`LIBRETRANSLATE_API_KEY`）
    pub fn from_env(source: &str, target: &str) -> MtResult<Self> {
        let endpoint = std::env::var("LIBRETRANSLATE_URL")
            .unwrap_or_else(|_| DEFAULT_LIBRETRANSLATE_URL.to_string());
        let api_key = std::env::var("LIBRETRANSLATE_API_KEY").ok();
        Self::new(&endpoint, api_key, source, target)
    }

    fn request_body(&self, text: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "q": text,
            "source": self.source,
            "target": self.target,
            "format": "text",
        });
        if let Some(key) = &self.api_key {
            body["api_key"] = serde_json::Value::String(key.clone());
        }
        body
    }
}

impl Translator for LibreTranslateProvider {
    fn translate(&self, text: &str) -> MtResult<String> {
        let response = self
            .client
            .post(format!("{}/translate", self.endpoint))
            .json(&self.request_body(text))
            .send()?;

        let status = response.status();
        let body: LibreResponse = response
            .json()
            .map_err(|e| MtError::TranslationError(format!("无法解析响应: {}", e)))?;

        if let Some(error) = body.error {
            return Err(MtError::TranslationError(format!("{} ({})", error, status)));
        }
        if !status.is_success() {
            return Err(MtError::TranslationError(format!("HTTP {}", status)));
        }

        Ok(or_original(body.translated_text.unwrap_or_default(), text))
    }

    fn provider_name(&self) -> &str {
        "LibreTranslate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_endpoint_and_locales() {
        let provider =
            LibreTranslateProvider::new("http://localhost:5000/", Some(" ".to_string()), "en-US", "ru")
                .unwrap();
        assert_eq!(provider.endpoint, "http://localhost:5000");
        assert_eq!(provider.source, "en");
        assert!(provider.api_key.is_none());

        let body = provider.request_body("Hello");
        assert_eq!(body["q"], "Hello");
        assert_eq!(body["target"], "ru");
        assert!(body.get("api_key").is_none());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(LibreTranslateProvider::new("", None, "en", "ru").is_err());
        assert!(LibreTranslateProvider::new("http://localhost", None, "", "ru").is_err());
    }

    #[test]
    fn test_response_parsing() {
        let ok: LibreResponse = serde_json::from_str(r#"{"translatedText": "Привет"}"#).unwrap();
        assert_eq!(ok.translated_text.as_deref(), Some("Привет"));

        let err: LibreResponse = serde_json::from_str(r#"{"error": "Invalid API key"}"#).unwrap();
        assert_eq!(err.error.as_deref(), Some("Invalid API key"));
    }
}
