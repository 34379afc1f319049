/// IO 抽象层模块
///
/// 该模块提供翻译表读写的抽象接口，核心逻辑只依赖"按行读取/按行写入"。
///
/// # 架构设计
///
/// - **traits**: 定义 Reader/Writer trait 接口
/// - **xlsx_io**: XLSX 实现（默认格式，带样式）
/// - **json_io**: JSON 实现
///
/// # 使用示例
///
/// ```rust,ignore
/// use tyrano_l10n::io::table_store_for;
///
/// let store = table_store_for(Path::new("translations.xlsx"))?;
/// let rows = store.read_rows(Path::new("translations.xlsx"))?;
/// ```
pub mod traits;
pub mod xlsx_io;
pub mod json_io;

use std::path::Path;
use crate::utils::L10nError;

// === 导出 trait 定义 ===
pub use traits::{TableReader, TableStore, TableWriter};

// === 导出默认实现 ===
pub use xlsx_io::XlsxTable;
pub use json_io::JsonTable;

/// 支持的表格扩展名
pub const TABLE_EXTENSIONS: &[&str] = &["xlsx", "json"];

/// 根据扩展名选择表格格式
pub fn table_store_for(path: &Path) -> Result<Box<dyn TableStore>, L10nError> {
    let extension = path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("xlsx") => Ok(Box::new(XlsxTable)),
        Some("json") => Ok(Box::new(JsonTable)),
        _ => Err(L10nError::InvalidPath(format!(
            "不支持的表格格式: {}（支持: {}）",
            path.display(),
            TABLE_EXTENSIONS.join(", ")
        ))),
    }
}
