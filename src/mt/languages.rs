//! 各翻译服务支持的语言（`translate --list` 使用）

use super::Engine;

const DEEPL_LANGUAGES: &[(&str, &str)] = &[
    ("bg", "Bulgarian"), ("cs", "Czech"), ("da", "Danish"), ("de", "German"),
    ("el", "Greek"), ("en", "English"), ("es", "Spanish"), ("et", "Estonian"),
    ("fi", "Finnish"), ("fr", "French"), ("hu", "Hungarian"), ("id", "Indonesian"),
    ("it", "Italian"), ("ja", "Japanese"), ("ko", "Korean"), ("lt", "Lithuanian"),
    ("lv", "Latvian"), ("nb", "Norwegian"), ("nl", "Dutch"), ("pl", "Polish"),
    ("pt", "Portuguese"), ("ro", "Romanian"), ("ru", "Russian"), ("sk", "Slovak"),
    ("sl", "Slovenian"), ("sv", "Swedish"), ("tr", "Turkish"), ("uk", "Ukrainian"),
    ("zh", "Chinese"),
];

const LIBRE_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"), ("cs", "Czech"), ("de", "German"), ("el", "Greek"),
    ("en", "English"), ("es", "Spanish"), ("fi", "Finnish"), ("fr", "French"),
    ("he", "Hebrew"), ("hi", "Hindi"), ("hu", "Hungarian"), ("id", "Indonesian"),
    ("it", "Italian"), ("ja", "Japanese"), ("ko", "Korean"), ("nl", "Dutch"),
    ("pl", "Polish"), ("pt", "Portuguese"), ("ru", "Russian"), ("sv", "Swedish"),
    ("tr", "Turkish"), ("uk", "Ukrainian"), ("vi", "Vietnamese"), ("zh", "Chinese"),
];

const MYMEMORY_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"), ("bg", "Bulgarian"), ("cs", "Czech"), ("da", "Danish"),
    ("de", "German"), ("el", "Greek"), ("en", "English"), ("es", "Spanish"),
    ("et", "Estonian"), ("fi", "Finnish"), ("fr", "French"), ("he", "Hebrew"),
    ("hi", "Hindi"), ("hu", "Hungarian"), ("id", "Indonesian"), ("it", "Italian"),
    ("ja", "Japanese"), ("ko", "Korean"), ("lt", "Lithuanian"), ("lv", "Latvian"),
    ("nl", "Dutch"), ("no", "Norwegian"), ("pl", "Polish"), ("pt", "Portuguese"),
    ("ro", "Romanian"), ("ru", "Russian"), ("sk", "Slovak"), ("sl", "Slovenian"),
    ("sv", "Swedish"), ("th", "Thai"), ("tr", "Turkish"), ("uk", "Ukrainian"),
    ("vi", "Vietnamese"), ("zh", "Chinese"),
];

impl Engine {
    /// 服务名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Engine::Libre => "LibreTranslate",
            Engine::Mymemory => "MyMemory",
            Engine::Deepl => "DeepL",
        }
    }

    /// 支持的语言 `(代码, 名称)`，按代码排序
    pub fn supported_languages(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Engine::Libre => LIBRE_LANGUAGES,
            Engine::Mymemory => MYMEMORY_LANGUAGES,
            Engine::Deepl => DEEPL_LANGUAGES,
        }
    }

    /// 是否支持某个语言代码（忽略地区部分）
    pub fn supports(&self, locale: &str) -> bool {
        let code = super::translator::normalize_locale(locale);
        self.supported_languages().iter().any(|(c, _)| *c == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_sorted_and_unique() {
        for engine in [Engine::Libre, Engine::Mymemory, Engine::Deepl] {
            let codes: Vec<&str> = engine.supported_languages().iter().map(|(c, _)| *c).collect();
            let mut sorted = codes.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(codes, sorted, "{}", engine.display_name());
            assert!(engine.supports("en"));
            assert!(engine.supports("ru"));
        }
    }

    #[test]
    fn test_supports_ignores_region() {
        assert!(Engine::Deepl.supports("pt-BR"));
        assert!(!Engine::Deepl.supports("ar"));
        assert!(Engine::Libre.supports("ar"));
    }
}
