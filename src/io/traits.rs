/// IO 抽象层 - trait 定义
///
/// 翻译表的持久化只约定"按行读取"和"按行写入"，单元格样式不属于该约定。

use std::path::Path;
use crate::table::TableRow;
use crate::utils::L10nError;

/// 翻译表读取 trait
///
/// # 职责
/// - 读取持久化的翻译表，返回不含表头的数据行
/// - 不负责解析字段含义，仅负责 IO 和单元格类型映射
pub trait TableReader {
    /// 读取翻译表
    ///
    /// # 参数
    /// * `path` - 表格文件路径
    fn read_rows(&self, path: &Path) -> Result<Vec<TableRow>, L10nError>;
}

/// 翻译表写入 trait
///
/// # 职责
/// - 写入表头和数据行
pub trait TableWriter {
    /// 写入翻译表
    ///
    /// # 参数
    /// * `rows` - 数据行（不含表头，列顺序见 `TABLE_HEADERS`）
    /// * `path` - 目标文件路径
    fn write_rows(&self, rows: &[TableRow], path: &Path) -> Result<(), L10nError>;
}

/// 同时支持读写的表格格式
pub trait TableStore: TableReader + TableWriter {}

impl<T: TableReader + TableWriter> TableStore for T {}
