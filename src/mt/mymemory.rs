//! MyMemory 提供者
//!
//! `GET https://api.mymemory.translated.net/get?q=..&langpair=en|ru`，
//! 可选 `de` 参数（邮箱）提高每日额度。

use super::error::{MtError, MtResult};
use super::translator::{normalize_locale, or_original, validate_locale, Translator};
use serde::Deserialize;
use std::time::Duration;

const MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    // 服务端有时返回数字，有时返回字符串
    #[serde(rename = "responseStatus", default)]
    response_status: serde_json::Value,
    #[serde(rename = "responseDetails", default)]
    response_details: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl MyMemoryResponse {
    fn status_code(&self) -> Option<u64> {
        match &self.response_status {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// MyMemory 翻译器
pub struct MyMemoryProvider {
    client: reqwest::blocking::Client,
    email: Option<String>,
    langpair: String,
}

impl MyMemoryProvider {
    pub fn new(email: Option<String>, source: &str, target: &str) -> MtResult<Self> {
        validate_locale(source)?;
        validate_locale(target)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            email: email.filter(|e| !e.trim().is_empty()),
            langpair: format!("{}|{}", normalize_locale(source), normalize_locale(target)),
        })
    }

    /// 从环境变量 `MYMEMORY_EMAIL` 读取邮箱
    pub fn from_env(source: &str, target: &str) -> MtResult<Self> {
        Self::new(std::env::var("MYMEMORY_EMAIL").ok(), source, target)
    }

    fn query<'a>(&'a self, text: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut query = vec![("q", text), ("langpair", self.langpair.as_str())];
        if let Some(email) = &self.email {
            query.push(("de", email.as_str()));
        }
        query
    }
}

impl Translator for MyMemoryProvider {
    fn translate(&self, text: &str) -> MtResult<String> {
        let response = self
            .client
            .get(MYMEMORY_URL)
            .query(&self.query(text))
            .send()?;

        let body: MyMemoryResponse = response
            .json()
            .map_err(|e| MtError::TranslationError(format!("无法解析响应: {}", e)))?;

        match body.status_code() {
            Some(200) | None => {}
            Some(code) => {
                return Err(MtError::TranslationError(format!(
                    "MyMemory 返回 {}: {}",
                    code, body.response_details
                )))
            }
        }

        let translated = body
            .response_data
            .and_then(|data| data.translated_text)
            .unwrap_or_default();
        Ok(or_original(translated, text))
    }

    fn provider_name(&self) -> &str {
        "MyMemory"
    }
}
