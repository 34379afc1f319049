use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

/// 可翻译字符串的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringKind {
    /// 文本块中的角色名行（`#名字`）
    CharacterName,
    /// 文本块中的对白/旁白行
    Dialogue,
    /// `[glink text="..."]` 按钮文本
    Button,
}

impl StringKind {
    /// 表格 Type 列中的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            StringKind::CharacterName => "character_name",
            StringKind::Dialogue => "dialogue",
            StringKind::Button => "button",
        }
    }
}

impl fmt::Display for StringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StringKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "character_name" => Ok(StringKind::CharacterName),
            "dialogue" => Ok(StringKind::Dialogue),
            "button" => Ok(StringKind::Button),
            other => Err(format!("未知的字符串类型: {}", other)),
        }
    }
}

/// 提取的字符串结构
///
/// 一次提取中，`character_name` 和 `dialogue` 由 `(file, line, kind)` 唯一定位；
/// `button` 同一行可能有多个，回填时按 `(file, 规范化文本)` 定位。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedString {
    /// 相对输入根目录的路径（统一使用 `/` 分隔）
    pub file: String,
    /// 行号（从 1 开始）
    pub line: usize,
    /// 字符串种类
    pub kind: StringKind,
    /// 去除控制标签后的可读文本
    pub original: String,
    /// 来源说明，仅供参考，不参与寻址
    pub context: String,
    /// 对白行去除标签前的原始内容（已 trim），回填时用于识别尾部标签
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_line: Option<String>,
}

impl ExtractedString {
    /// 创建新的提取字符串
    pub fn new(
        file: String,
        line: usize,
        kind: StringKind,
        original: String,
        context: String,
    ) -> Self {
        ExtractedString {
            file,
            line,
            kind,
            original,
            context,
            raw_line: None,
        }
    }

    /// 附带原始行内容
    pub fn with_raw_line(mut self, raw_line: String) -> Self {
        self.raw_line = Some(raw_line);
        self
    }

    /// 生成唯一标识符用于调试输出
    ///
    /// 格式：{file}|{line}|{kind}
    pub fn get_unique_key(&self) -> String {
        format!("{}|{}|{}", self.file, self.line, self.kind)
    }
}
