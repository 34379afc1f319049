use serde::{Deserialize, Serialize};
use std::fmt;

/// 表格单元格的值
///
/// 持久化格式可能保存带类型的单元格（XLSX 中的数字、布尔等），
/// 读取时统一通过 `as_text` / `as_line` 做宽松转换。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// 是否为空（空单元格或只含空白的文本）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 转换为文本
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// 转换为行号
    ///
    /// 接受正整数、整数值的浮点数以及可解析为整数的文本；其余返回 `None`。
    pub fn as_line(&self) -> Option<usize> {
        let value = match self {
            CellValue::Int(i) => *i,
            CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 => *f as i64,
            CellValue::String(s) => s.trim().parse::<i64>().ok()?,
            _ => return None,
        };
        usize::try_from(value).ok().filter(|&line| line > 0)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        CellValue::Int(n as i64)
    }
}

/// 表格中的一行（不含表头）
pub type TableRow = Vec<CellValue>;
