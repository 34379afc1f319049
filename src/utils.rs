use thiserror::Error;
use std::path::{Path, PathBuf};

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum L10nError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Table error: {0}")]
    Table(String),

    #[error("XLSX error: {0}")]
    Xlsx(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<calamine::Error> for L10nError {
    fn from(e: calamine::Error) -> Self {
        L10nError::Xlsx(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for L10nError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        L10nError::Xlsx(e.to_string())
    }
}

/// 统一路径分隔符（`\` → `/`），保证寻址与平台无关
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// 计算 `path` 相对于 `root` 的规范化路径
pub fn relative_key(root: &Path, path: &Path) -> Result<String, L10nError> {
    let relative = path.strip_prefix(root)
        .map_err(|_| L10nError::InvalidPath(format!("{} 不在 {} 之下", path.display(), root.display())))?;

    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    Ok(normalize_separators(&joined))
}

/// 创建文件备份
pub fn create_backup(file_path: &Path) -> Result<PathBuf, L10nError> {
    if !file_path.exists() {
        return Err(L10nError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "原文件不存在"
        )));
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    let extension = file_path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    let backup_path = file_path.with_extension(format!("{}.{}.bak", extension, timestamp));

    std::fs::copy(file_path, &backup_path)?;

    Ok(backup_path)
}

/// 截断过长文本，用于日志和摘要输出
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_separators(r"scenario\chapter1\first.ks"), "scenario/chapter1/first.ks");
        assert_eq!(normalize_separators("scenario/first.ks"), "scenario/first.ks");
    }

    #[test]
    fn test_relative_key() {
        let root = Path::new("data");
        let path = root.join("scenario").join("first.ks");
        assert_eq!(relative_key(root, &path).unwrap(), "scenario/first.ks");

        assert!(relative_key(Path::new("other"), &path).is_err());
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("Привет, мир", 6), "Привет...");
    }

    #[test]
    fn test_create_backup() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("translations_translated.xlsx");

        assert!(create_backup(&file).is_err());

        std::fs::write(&file, b"data").unwrap();
        let backup = create_backup(&file).unwrap();
        assert!(backup.exists());
        assert!(backup.to_string_lossy().ends_with(".bak"));
        assert_eq!(std::fs::read(&backup).unwrap(), b"data");
    }
}
