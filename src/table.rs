/// 翻译表
///
/// - **cell**: 单元格值及宽松类型转换
/// - **record**: 翻译表行结构与生成
/// - **map**: 回填用的翻译映射（按行号 / 按按钮文本两种寻址）
pub mod cell;
pub mod record;
pub mod map;

pub use cell::{CellValue, TableRow};
pub use record::{
    build_records, records_to_rows, TranslationRecord, JSON_KEYS, MIN_COLUMNS, ORIGINAL_COLUMN,
    TABLE_HEADERS, TRANSLATION_COLUMN,
};
pub use map::{ButtonKey, LineKey, TranslationMap};
