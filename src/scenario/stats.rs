use super::{split_line_ending, BlockTracker, LineClass, Scenario};
use crate::tags;

/// 场景统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioStats {
    pub name: String,
    pub line_count: usize,
    pub text_block_count: usize,
    pub character_name_count: usize,
    pub dialogue_count: usize,
    pub tag_only_count: usize,
    pub button_count: usize,
    /// 文件结束时文本块仍未关闭
    pub unclosed_block: bool,
}

impl ScenarioStats {
    /// 可翻译字符串总数
    pub fn string_count(&self) -> usize {
        self.character_name_count + self.dialogue_count + self.button_count
    }

    /// 累加另一个文件的统计
    pub fn merge(&mut self, other: &ScenarioStats) {
        self.line_count += other.line_count;
        self.text_block_count += other.text_block_count;
        self.character_name_count += other.character_name_count;
        self.dialogue_count += other.dialogue_count;
        self.tag_only_count += other.tag_only_count;
        self.button_count += other.button_count;
        self.unclosed_block |= other.unclosed_block;
    }
}

impl std::fmt::Display for ScenarioStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== 场景统计信息 ===")?;
        writeln!(f, "名称: {}", self.name)?;
        writeln!(f, "行数: {}", self.line_count)?;
        writeln!(f, "文本块数: {}", self.text_block_count)?;
        writeln!(f, "角色名: {}", self.character_name_count)?;
        writeln!(f, "对白: {}", self.dialogue_count)?;
        writeln!(f, "纯标签行: {}", self.tag_only_count)?;
        writeln!(f, "按钮: {}", self.button_count)?;
        writeln!(f, "可翻译字符串数: {}", self.string_count())?;
        if self.unclosed_block {
            writeln!(f, "⚠ 存在未关闭的文本块")?;
        }
        Ok(())
    }
}

impl Scenario {
    /// 获取统计信息
    pub fn get_stats(&self) -> ScenarioStats {
        let mut stats = ScenarioStats {
            name: self.relative_path.clone(),
            line_count: self.line_count(),
            ..Default::default()
        };
        let mut tracker = BlockTracker::new();

        for (index, raw_line) in self.lines.iter().enumerate() {
            let class = tracker.classify(index + 1, raw_line);
            match class {
                LineClass::BlockStart => stats.text_block_count += 1,
                LineClass::CharacterName(_) => stats.character_name_count += 1,
                LineClass::Dialogue { .. } => stats.dialogue_count += 1,
                LineClass::TagOnly => stats.tag_only_count += 1,
                _ => {}
            }

            if class.scans_buttons() {
                let (body, _) = split_line_ending(raw_line);
                stats.button_count += tags::glink_labels(body)
                    .into_iter()
                    .filter(|label| !tags::decode_nbsp(label).trim().is_empty())
                    .count();
            }
        }

        stats.unclosed_block = tracker.block_start_line().is_some();
        stats
    }
}
