use super::{split_line_ending, BlockTracker, LineClass, Scenario};
use crate::string_types::{ExtractedString, StringKind};
use crate::tags;

/// 按钮字符串的来源说明
pub const BUTTON_CONTEXT: &str = "Menu button / glink";

/// 文本块字符串的来源说明
pub fn text_block_context(start_line: usize) -> String {
    format!("Text block starting line {}", start_line)
}

impl Scenario {
    /// 提取所有可翻译字符串
    ///
    /// 顺序：按行号，同一行内先角色名/对白，再按出现顺序的按钮。
    pub fn extract_strings(&self) -> Vec<ExtractedString> {
        let mut strings = Vec::new();
        let mut tracker = BlockTracker::new();

        for (index, raw_line) in self.lines.iter().enumerate() {
            let line_number = index + 1;
            let class = tracker.classify(line_number, raw_line);
            let context = || text_block_context(tracker.block_start_line().unwrap_or(line_number));

            match &class {
                LineClass::CharacterName(name) => {
                    strings.push(ExtractedString::new(
                        self.relative_path.clone(),
                        line_number,
                        StringKind::CharacterName,
                        name.clone(),
                        context(),
                    ));
                }
                LineClass::Dialogue { text, raw } => {
                    strings.push(
                        ExtractedString::new(
                            self.relative_path.clone(),
                            line_number,
                            StringKind::Dialogue,
                            text.clone(),
                            context(),
                        )
                        .with_raw_line(raw.clone()),
                    );
                }
                _ => {}
            }

            if class.scans_buttons() {
                let (body, _) = split_line_ending(raw_line);
                strings.extend(self.extract_buttons(line_number, body));
            }
        }

        tracing::debug!("{}: 提取到 {} 个字符串", self.relative_path, strings.len());
        for s in &strings {
            tracing::trace!("{} \"{}\"", s.get_unique_key(), crate::utils::preview(&s.original, 40));
        }
        strings
    }

    /// 提取一行中的 `[glink]` 按钮文本
    fn extract_buttons(&self, line_number: usize, line: &str) -> Vec<ExtractedString> {
        tags::glink_labels(line)
            .into_iter()
            .map(tags::decode_nbsp)
            .filter(|label| !label.trim().is_empty())
            .map(|label| {
                ExtractedString::new(
                    self.relative_path.clone(),
                    line_number,
                    StringKind::Button,
                    label,
                    BUTTON_CONTEXT.to_string(),
                )
            })
            .collect()
    }
}
