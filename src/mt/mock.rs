//! 测试用的模拟翻译器
//!
//! 不访问网络，结果可预测。

use super::error::{MtError, MtResult};
use super::translator::Translator;
use std::cell::Cell;
use std::collections::HashMap;

/// 模拟翻译模式
#[derive(Debug, Clone)]
pub enum MockMode {
    /// 追加目标语言后缀："hello" → "hello_ru"
    Suffix,
    /// 预设映射，未命中时按 Suffix 处理
    Mappings(HashMap<String, String>),
    /// 总是返回错误
    Error(String),
    /// 总是返回空文本（应回退为原文）
    Empty,
    /// 原样返回
    NoOp,
}

/// 模拟翻译器
#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    target: String,
    calls: Cell<usize>,
}

impl MockTranslator {
    pub fn new(mode: MockMode, target: &str) -> Self {
        Self {
            mode,
            target: target.to_string(),
            calls: Cell::new(0),
        }
    }

    /// 已调用次数
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Translator for MockTranslator {
    fn translate(&self, text: &str) -> MtResult<String> {
        self.calls.set(self.calls.get() + 1);

        let translated = match &self.mode {
            MockMode::Suffix => format!("{}_{}", text, self.target),
            MockMode::Mappings(map) => map
                .get(text)
                .cloned()
                .unwrap_or_else(|| format!("{}_{}", text, self.target)),
            MockMode::Error(msg) => return Err(MtError::TranslationError(msg.clone())),
            MockMode::Empty => String::new(),
            MockMode::NoOp => text.to_string(),
        };

        Ok(super::translator::or_original(translated, text))
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        let suffix = MockTranslator::new(MockMode::Suffix, "ru");
        assert_eq!(suffix.translate("hello").unwrap(), "hello_ru");

        let mut map = HashMap::new();
        map.insert("Start".to_string(), "Начать".to_string());
        let mapped = MockTranslator::new(MockMode::Mappings(map), "ru");
        assert_eq!(mapped.translate("Start").unwrap(), "Начать");
        assert_eq!(mapped.translate("Quit").unwrap(), "Quit_ru");

        let failing = MockTranslator::new(MockMode::Error("quota".to_string()), "ru");
        assert!(failing.translate("hello").is_err());

        let empty = MockTranslator::new(MockMode::Empty, "ru");
        assert_eq!(empty.translate("hello").unwrap(), "hello");

        let noop = MockTranslator::new(MockMode::NoOp, "ru");
        assert_eq!(noop.translate("hello").unwrap(), "hello");
        assert_eq!(noop.calls(), 1);
        assert_eq!(noop.provider_name(), "Mock Translator");
    }
}
