use super::cell::TableRow;
use super::record::TranslationRecord;
use crate::string_types::StringKind;
use crate::tags;
use crate::utils::normalize_separators;
use std::collections::HashMap;

/// 按行号寻址的键：`(file, line, kind)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub file: String,
    pub line: usize,
    pub kind: StringKind,
}

impl LineKey {
    pub fn new(file: &str, line: usize, kind: StringKind) -> Self {
        Self {
            file: normalize_separators(file),
            line,
            kind,
        }
    }
}

/// 按按钮文本寻址的键：`(file, 规范化文本)`
///
/// 同一文件中文本相同的按钮共用一个键，会得到同一个译文。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ButtonKey {
    pub file: String,
    pub label: String,
}

impl ButtonKey {
    /// `label` 可以是原始属性值（含 `&nbsp;`）或已规范化的文本
    pub fn new(file: &str, label: &str) -> Self {
        Self {
            file: normalize_separators(file),
            label: tags::decode_nbsp(label).trim().to_string(),
        }
    }
}

/// 翻译映射
///
/// 每次回填时从翻译表重新构建，不持久化。重复键后写入者覆盖先写入者。
#[derive(Debug, Clone, Default)]
pub struct TranslationMap {
    by_line: HashMap<LineKey, String>,
    by_button: HashMap<ButtonKey, String>,
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从表格行构建（不含表头）
    ///
    /// 无法解析的行和译文为空的行会被跳过。
    pub fn from_rows(rows: &[TableRow]) -> Self {
        let mut map = Self::new();
        let mut skipped = 0usize;

        for (index, row) in rows.iter().enumerate() {
            match TranslationRecord::from_row(row) {
                Some(record) => map.insert_record(&record),
                None => {
                    skipped += 1;
                    tracing::debug!("跳过第 {} 行：列数不足或字段无效", index + 2);
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("翻译表中有 {} 行无法解析，已跳过", skipped);
        }
        tracing::info!("已加载 {} 条翻译（按钮 {} 条）", map.len(), map.button_count());
        map
    }

    /// 从翻译记录构建
    pub fn from_records(records: &[TranslationRecord]) -> Self {
        let mut map = Self::new();
        for record in records {
            map.insert_record(record);
        }
        map
    }

    /// 加入一条记录；未翻译的记录忽略
    pub fn insert_record(&mut self, record: &TranslationRecord) {
        if !record.is_translated() {
            return;
        }
        let translation = record.translation.trim().to_string();

        if record.kind == StringKind::Button {
            self.by_button.insert(ButtonKey::new(&record.file, &record.original), translation.clone());
        }
        self.by_line.insert(LineKey::new(&record.file, record.line, record.kind), translation);
    }

    /// 按行号查找
    pub fn line_translation(&self, file: &str, line: usize, kind: StringKind) -> Option<&str> {
        self.by_line.get(&LineKey::new(file, line, kind)).map(String::as_str)
    }

    /// 按按钮文本查找
    pub fn button_translation(&self, file: &str, label: &str) -> Option<&str> {
        self.by_button.get(&ButtonKey::new(file, label)).map(String::as_str)
    }

    /// 按行号寻址的条目数
    pub fn len(&self) -> usize {
        self.by_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty() && self.by_button.is_empty()
    }

    /// 按文本寻址的按钮条目数
    pub fn button_count(&self) -> usize {
        self.by_button.len()
    }
}
