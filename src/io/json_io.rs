/// JSON 翻译表实现
///
/// 以 `TranslationRecord` 字段名为键的对象数组；读取时也接受按列顺序排列的数组。

use std::path::Path;
use serde_json::{Map, Value};
use super::traits::{TableReader, TableWriter};
use crate::table::{CellValue, TableRow, JSON_KEYS};
use crate::utils::L10nError;

/// JSON 翻译表
#[derive(Debug, Clone, Default)]
pub struct JsonTable;

impl TableReader for JsonTable {
    fn read_rows(&self, path: &Path) -> Result<Vec<TableRow>, L10nError> {
        let content = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;

        let items = value.as_array()
            .ok_or_else(|| L10nError::Table(format!("{} 不是 JSON 数组", path.display())))?;

        Ok(items.iter().map(row_from_json).collect())
    }
}

impl TableWriter for JsonTable {
    fn write_rows(&self, rows: &[TableRow], path: &Path) -> Result<(), L10nError> {
        let objects = rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                for (key, cell) in JSON_KEYS.iter().zip(row.iter()) {
                    object.insert(key.to_string(), serde_json::to_value(cell)?);
                }
                Ok(Value::Object(object))
            })
            .collect::<Result<Vec<Value>, serde_json::Error>>()?;

        let json_output = serde_json::to_string_pretty(&objects)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json_output)?;
        Ok(())
    }
}

fn row_from_json(item: &Value) -> TableRow {
    match item {
        Value::Object(object) => JSON_KEYS
            .iter()
            .map(|key| object.get(*key).map(cell_from_json).unwrap_or_default())
            .collect(),
        Value::Array(cells) => cells.iter().map(cell_from_json).collect(),
        _ => Vec::new(),
    }
}

fn cell_from_json(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Int(i),
            None => n.as_f64().map(CellValue::Float).unwrap_or_default(),
        },
        Value::String(s) => CellValue::String(s.clone()),
        other => CellValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string_types::StringKind;
    use crate::table::{TranslationMap, TranslationRecord};
    use tempfile::TempDir;

    #[test]
    fn test_written_json_deserializes_as_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("translations.json");

        let record = TranslationRecord {
            id: 1,
            file: "a.ks".to_string(),
            line: 5,
            kind: StringKind::Dialogue,
            original: "Hello".to_string(),
            translation: "Привет".to_string(),
            context: "Text block starting line 3".to_string(),
        };
        JsonTable.write_rows(&[record.to_row()], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<TranslationRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec![record]);
    }

    #[test]
    fn test_read_objects_and_arrays() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mixed.json");
        std::fs::write(&path, r#"[
            {"id": 1, "file": "a.ks", "line": "2", "type": "dialogue", "original": "Hi", "translation": "Привет"},
            [2, "a.ks", 3.0, "character_name", "Bob", "Боб", "ctx", "extra"],
            [3, "a.ks"],
            "garbage"
        ]"#).unwrap();

        let rows = JsonTable.read_rows(&path).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].len(), JSON_KEYS.len());
        assert!(rows[3].is_empty());

        let map = TranslationMap::from_rows(&rows);
        assert_eq!(map.line_translation("a.ks", 2, StringKind::Dialogue), Some("Привет"));
        assert_eq!(map.line_translation("a.ks", 3, StringKind::CharacterName), Some("Боб"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("nested").join("t.json");

        JsonTable.write_rows(&[vec![CellValue::Int(1)]], &path).unwrap();
        assert_eq!(JsonTable.read_rows(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_non_array_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("object.json");
        std::fs::write(&path, r#"{"rows": []}"#).unwrap();
        assert!(matches!(JsonTable.read_rows(&path), Err(L10nError::Table(_))));
    }
}
