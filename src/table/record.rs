use super::cell::{CellValue, TableRow};
use crate::string_types::{ExtractedString, StringKind};
use serde::{Deserialize, Serialize};

/// 表头（固定列顺序）
pub const TABLE_HEADERS: [&str; 7] = ["ID", "File", "Line", "Type", "Original", "Translation", "Context"];

/// JSON 格式使用的字段名（与表头一一对应）
pub const JSON_KEYS: [&str; 7] = ["id", "file", "line", "type", "original", "translation", "context"];

/// Original 列索引
pub const ORIGINAL_COLUMN: usize = 4;
/// Translation 列索引
pub const TRANSLATION_COLUMN: usize = 5;
/// 读取时要求的最少列数
pub const MIN_COLUMNS: usize = 6;

/// 翻译表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// 序号（从 1 开始，仅用于展示）
    pub id: usize,
    pub file: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub kind: StringKind,
    pub original: String,
    /// 为空表示尚未翻译
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub context: String,
}

impl TranslationRecord {
    /// 转换为表格行
    pub fn to_row(&self) -> TableRow {
        vec![
            CellValue::from(self.id),
            CellValue::from(self.file.as_str()),
            CellValue::from(self.line),
            CellValue::from(self.kind.as_str()),
            CellValue::from(self.original.as_str()),
            CellValue::from(self.translation.as_str()),
            CellValue::from(self.context.as_str()),
        ]
    }

    /// 从表格行解析
    ///
    /// 少于 6 列、行号无法转换或类型未知时返回 `None`；多余的列忽略。
    pub fn from_row(row: &[CellValue]) -> Option<Self> {
        if row.len() < MIN_COLUMNS {
            return None;
        }

        Some(TranslationRecord {
            id: row[0].as_line().unwrap_or(0),
            file: crate::utils::normalize_separators(&row[1].as_text()),
            line: row[2].as_line()?,
            kind: row[3].as_text().parse().ok()?,
            original: row[4].as_text(),
            translation: row[5].as_text(),
            context: row.get(6).map(CellValue::as_text).unwrap_or_default(),
        })
    }

    /// 是否已有翻译
    pub fn is_translated(&self) -> bool {
        !self.translation.trim().is_empty()
    }
}

/// 由提取结果生成翻译表
///
/// 保持输入顺序（文件遍历顺序，再按行号），ID 从 1 开始连续编号，译文为空。
pub fn build_records(strings: &[ExtractedString]) -> Vec<TranslationRecord> {
    strings
        .iter()
        .enumerate()
        .map(|(i, s)| TranslationRecord {
            id: i + 1,
            file: s.file.clone(),
            line: s.line,
            kind: s.kind,
            original: s.original.clone(),
            translation: String::new(),
            context: s.context.clone(),
        })
        .collect()
}

/// 翻译表转换为行
pub fn records_to_rows(records: &[TranslationRecord]) -> Vec<TableRow> {
    records.iter().map(TranslationRecord::to_row).collect()
}
