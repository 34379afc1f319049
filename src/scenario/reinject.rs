use super::{split_line_ending, BlockTracker, LineClass, Scenario};
use crate::string_types::StringKind;
use crate::table::TranslationMap;
use crate::tags::{self, CONTINUE_TAG};

impl Scenario {
    /// 回填翻译，生成新的场景
    ///
    /// 与提取使用同一状态机。没有对应译文的行逐字节保留（含换行符）。
    /// 被替换的角色名/对白行保留原行首缩进和换行符。
    pub fn apply_translations(&self, translations: &TranslationMap) -> Scenario {
        let mut tracker = BlockTracker::new();
        let mut applied_count = 0usize;

        let lines = self.lines
            .iter()
            .enumerate()
            .map(|(index, raw_line)| {
                let line_number = index + 1;
                let class = tracker.classify(line_number, raw_line);
                let new_line = self.translate_line(&class, line_number, raw_line, translations);
                if new_line != *raw_line {
                    applied_count += 1;
                }
                new_line
            })
            .collect();

        tracing::debug!("{}: 替换了 {} 行", self.relative_path, applied_count);

        Scenario {
            relative_path: self.relative_path.clone(),
            lines,
        }
    }

    /// 处理单行
    fn translate_line(
        &self,
        class: &LineClass,
        line_number: usize,
        raw_line: &str,
        translations: &TranslationMap,
    ) -> String {
        let (body, ending) = split_line_ending(raw_line);
        let indent = &body[..body.len() - body.trim_start().len()];

        let replaced = match class {
            LineClass::CharacterName(_) => translations
                .line_translation(&self.relative_path, line_number, StringKind::CharacterName)
                .map(|name| format!("{}#{}{}", indent, name, ending)),
            LineClass::Dialogue { raw, .. } => translations
                .line_translation(&self.relative_path, line_number, StringKind::Dialogue)
                .map(|text| format!("{}{}{}", indent, rebuild_dialogue(text, raw), ending)),
            _ => None,
        };

        if let Some(line) = replaced {
            return line;
        }

        if class.scans_buttons() && translations.button_count() > 0 {
            return tags::replace_glink_labels(raw_line, |label| {
                translations
                    .button_translation(&self.relative_path, label)
                    .map(tags::encode_label)
            });
        }

        raw_line.to_string()
    }
}

/// 用译文重建对白行
///
/// 顺序：译文 → 原行中的 `[emb]` 标签（译文中已有的不重复追加）→ 行尾 `[p]`。
/// 其他行内标签不保留。
pub fn rebuild_dialogue(translation: &str, raw_line: &str) -> String {
    let mut text = translation.to_string();

    for emb in tags::embedded_expressions(raw_line) {
        if !text.contains(emb) {
            text.push_str(emb);
        }
    }

    if raw_line.ends_with(CONTINUE_TAG) && !text.ends_with(CONTINUE_TAG) {
        text.push_str(CONTINUE_TAG);
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{build_records, TranslationMap, TranslationRecord};

    fn record(file: &str, line: usize, kind: StringKind, original: &str, translation: &str) -> TranslationRecord {
        TranslationRecord {
            id: line,
            file: file.to_string(),
            line,
            kind,
            original: original.to_string(),
            translation: translation.to_string(),
            context: String::new(),
        }
    }

    #[test]
    fn test_rebuild_dialogue() {
        assert_eq!(rebuild_dialogue("Привет", "Hello there[emb exp=\"x\"][p]"), "Привет[emb exp=\"x\"][p]");
        assert_eq!(rebuild_dialogue("Привет[p]", "Hello[p]"), "Привет[p]");
        assert_eq!(rebuild_dialogue("[emb exp=\"x\"] здесь", "[emb exp=\"x\"] here"), "[emb exp=\"x\"] здесь");
        assert_eq!(rebuild_dialogue("Ладно", "Fine[l][r]"), "Ладно");
        assert_eq!(rebuild_dialogue("Ну[p]", "Well[p] then"), "Ну[p]");
    }

    #[test]
    fn test_character_name_replaced() {
        let text = "[cm]\n[tb_start_text mode=1 ]\n[cm]\n\n#Alice\nHi[p]\n[_tb_end_text]\n";
        let scenario = Scenario::from_text("a.ks", text);
        let map = TranslationMap::from_records(&[record("a.ks", 5, StringKind::CharacterName, "Alice", "Алиса")]);

        let translated = scenario.apply_translations(&map);
        assert_eq!(translated.lines[4], "#Алиса\n");
        assert_eq!(scenario.changed_lines(&translated), vec![5]);
    }

    #[test]
    fn test_dialogue_keeps_emb_and_continue_tag() {
        let text = "[tb_start_text mode=1 ]\r\nHello there[emb exp=\"x\"][p]\r\n[_tb_end_text]\r\n";
        let scenario = Scenario::from_text("a.ks", text);
        let map = TranslationMap::from_records(&[record("a.ks", 2, StringKind::Dialogue, "Hello there", "Привет")]);

        let translated = scenario.apply_translations(&map);
        assert_eq!(translated.lines[1], "Привет[emb exp=\"x\"][p]\r\n");
    }

    #[test]
    fn test_other_inline_tags_are_dropped() {
        let text = "[tb_start_text mode=1 ]\nHello [ruby text=\"x\"]world[p]\n[_tb_end_text]\n";
        let scenario = Scenario::from_text("a.ks", text);
        let map = TranslationMap::from_records(&[record("a.ks", 2, StringKind::Dialogue, "Hello world", "Привет мир")]);

        assert_eq!(scenario.apply_translations(&map).lines[1], "Привет мир[p]\n");
    }

    #[test]
    fn test_duplicate_buttons_all_replaced() {
        let text = "[glink text=\"Start\" target=\"*a\"]\n[cm]\n[glink  x=\"1\" text=\"Start\"][glink text=\"Quit\"]\n";
        let scenario = Scenario::from_text("menu.ks", text);
        let map = TranslationMap::from_records(&[record("menu.ks", 1, StringKind::Button, "Start", "Начать")]);

        let translated = scenario.apply_translations(&map);
        assert_eq!(
            translated.to_text(),
            "[glink text=\"Начать\" target=\"*a\"]\n[cm]\n[glink  x=\"1\" text=\"Начать\"][glink text=\"Quit\"]\n"
        );
    }

    #[test]
    fn test_nbsp_button_round_trip() {
        let text = "[glink text=\"Next&nbsp;Step\" target=\"*next\"]\n";
        let scenario = Scenario::from_text("menu.ks", text);

        let extracted = scenario.extract_strings();
        assert_eq!(extracted[0].original, "Next Step");

        let mut records = build_records(&extracted);
        records[0].translation = "Следующий шаг".to_string();
        let translated = scenario.apply_translations(&TranslationMap::from_records(&records));
        assert_eq!(translated.lines[0], "[glink text=\"Следующий&nbsp;шаг\" target=\"*next\"]\n");
    }

    #[test]
    fn test_indentation_kept() {
        let text = "[tb_start_text mode=1 ]\n  #Alice\n\t  Hello there[p]\n[_tb_end_text]\n";
        let scenario = Scenario::from_text("a.ks", text);
        let map = TranslationMap::from_records(&[
            record("a.ks", 2, StringKind::CharacterName, "Alice", "Алиса"),
            record("a.ks", 3, StringKind::Dialogue, "Hello there", "Привет"),
        ]);

        let translated = scenario.apply_translations(&map);
        assert_eq!(translated.lines[1], "  #Алиса\n");
        assert_eq!(translated.lines[2], "\t  Привет[p]\n");
    }

    #[test]
    fn test_button_quote_is_escaped() {
        let text = "[glink text=\"Say\" target=\"*a\"]\n";
        let scenario = Scenario::from_text("menu.ks", text);
        let map = TranslationMap::from_records(&[record("menu.ks", 1, StringKind::Button, "Say", "Say \"hi\"")]);

        let translated = scenario.apply_translations(&map);
        assert_eq!(translated.lines[0], "[glink text=\"Say&nbsp;&quot;hi&quot;\" target=\"*a\"]\n");

        let labels: Vec<String> = translated.extract_strings().into_iter().map(|s| s.original).collect();
        assert_eq!(labels, vec!["Say &quot;hi&quot;"]);
    }

    #[test]
    fn test_tag_only_line_never_replaced() {
        let text = "[tb_start_text mode=1 ]\n[cm]\n[_tb_end_text]\n";
        let scenario = Scenario::from_text("a.ks", text);
        let map = TranslationMap::from_records(&[record("a.ks", 2, StringKind::Dialogue, "?", "Текст")]);

        assert_eq!(scenario.apply_translations(&map), scenario);
    }

    #[test]
    fn test_other_files_untouched() {
        let text = "[tb_start_text mode=1 ]\n#Alice\n[_tb_end_text]\n";
        let scenario = Scenario::from_text("b.ks", text);
        let map = TranslationMap::from_records(&[record("a.ks", 2, StringKind::CharacterName, "Alice", "Алиса")]);

        assert_eq!(scenario.apply_translations(&map).to_text(), text);
    }
}
