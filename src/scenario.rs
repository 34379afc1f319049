use crate::utils::{relative_key, L10nError};
use std::path::{Path, PathBuf};

pub mod state;
mod extract;
mod reinject;
mod stats;

pub use state::{BlockState, BlockTracker, LineClass};
pub use stats::ScenarioStats;

/// TyranoScript 场景文件（`.ks`）
///
/// 按行保存，每行保留原始换行符（`\n`、`\r\n` 或末行无换行），
/// `to_text()` 可逐字节还原原文件。回填翻译总是生成新的 `Scenario`，不修改原值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// 相对输入根目录的路径（统一使用 `/` 分隔）
    pub relative_path: String,
    /// 文件各行（含换行符）
    pub lines: Vec<String>,
}

impl Scenario {
    /// 从输入根目录加载场景文件
    ///
    /// # 参数
    /// * `root` - 输入根目录
    /// * `path` - 场景文件路径（必须位于 `root` 之下）
    pub fn load(root: &Path, path: &Path) -> Result<Self, L10nError> {
        let relative_path = relative_key(root, path)?;
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(relative_path, &text))
    }

    /// 从文本创建场景
    pub fn from_text(relative_path: impl Into<String>, text: &str) -> Self {
        Scenario {
            relative_path: crate::utils::normalize_separators(&relative_path.into()),
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    /// 拼接为完整文本
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// 行数
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 写入到输出根目录下的同名相对路径
    pub fn write_to_file(&self, output_root: &Path) -> Result<PathBuf, L10nError> {
        let output_path = self.relative_path
            .split('/')
            .fold(output_root.to_path_buf(), |path, part| path.join(part));

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&output_path, self.to_text())?;

        Ok(output_path)
    }

    /// 与另一个场景逐行对比，返回不同行的行号（从 1 开始）
    pub fn changed_lines(&self, other: &Scenario) -> Vec<usize> {
        let max = self.lines.len().max(other.lines.len());
        (0..max)
            .filter(|&i| self.lines.get(i) != other.lines.get(i))
            .map(|i| i + 1)
            .collect()
    }
}

/// 拆分行内容与行尾换行符
pub(crate) fn split_line_ending(line: &str) -> (&str, &str) {
    let body = line.trim_end_matches(['\r', '\n']);
    (body, &line[body.len()..])
}
