/// 文本块状态机
///
/// 提取和回填共用同一个 `BlockTracker`，保证两边对每一行的判定完全一致。
/// 每个文件使用新的 tracker，状态不跨文件。

use crate::tags::{self, TEXT_BLOCK_END, TEXT_BLOCK_START};

/// 文本块状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    /// 不在文本块内（命令行区域）
    #[default]
    Outside,
    /// 位于 `[tb_start_text ...]` 与 `[_tb_end_text]` 之间
    InsideTextBlock {
        /// 起始标记所在行号
        start_line: usize,
    },
}

/// 单行的判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// 文本块起始标记行
    BlockStart,
    /// 文本块结束标记行
    BlockEnd,
    /// 文本块内的角色名行
    CharacterName(String),
    /// 文本块内的空行或单独的 `#`
    Blank,
    /// 文本块内只有控制标签的行
    TagOnly,
    /// 文本块内的对白行
    Dialogue {
        /// 去除标签并 trim 后的文本
        text: String,
        /// trim 后的原始行（保留标签）
        raw: String,
    },
    /// 文本块外的行
    Command,
}

impl LineClass {
    /// 是否需要扫描 `[glink]` 按钮
    ///
    /// 块标记行以外的每一行都要扫描，与所在块无关。
    pub fn scans_buttons(&self) -> bool {
        !matches!(self, LineClass::BlockStart | LineClass::BlockEnd)
    }
}

/// 文本块追踪器
#[derive(Debug, Default)]
pub struct BlockTracker {
    state: BlockState,
}

impl BlockTracker {
    /// 创建新的追踪器（初始状态：块外）
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前状态
    pub fn state(&self) -> BlockState {
        self.state
    }

    /// 当前文本块的起始行号
    pub fn block_start_line(&self) -> Option<usize> {
        match self.state {
            BlockState::InsideTextBlock { start_line } => Some(start_line),
            BlockState::Outside => None,
        }
    }

    /// 判定一行并推进状态
    ///
    /// `line` 可以带行尾换行符，判定时会去掉。
    pub fn classify(&mut self, line_number: usize, line: &str) -> LineClass {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.contains(TEXT_BLOCK_START) {
            self.state = BlockState::InsideTextBlock { start_line: line_number };
            return LineClass::BlockStart;
        }
        if line.contains(TEXT_BLOCK_END) {
            self.state = BlockState::Outside;
            return LineClass::BlockEnd;
        }

        if self.state == BlockState::Outside {
            return LineClass::Command;
        }

        let trimmed = line.trim();

        if let Some(name) = tags::parse_character_name(trimmed) {
            return LineClass::CharacterName(name.to_string());
        }

        if trimmed.is_empty() || trimmed == "#" {
            return LineClass::Blank;
        }

        if tags::is_tag_only(trimmed) {
            return LineClass::TagOnly;
        }

        let text = tags::strip_tags(trimmed).trim().to_string();
        if text.is_empty() {
            return LineClass::TagOnly;
        }

        LineClass::Dialogue {
            text,
            raw: trimmed.to_string(),
        }
    }
}
