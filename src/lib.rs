pub mod utils;
pub mod string_types;
pub mod tags;
pub mod scenario;
pub mod table;
pub mod io;
pub mod project;
pub mod mt;

// 重新导出主要结构
pub use scenario::{Scenario, ScenarioStats};
pub use string_types::{ExtractedString, StringKind};
pub use table::{TranslationMap, TranslationRecord};
pub use project::{apply_directory, extract_directory, verify_round_trip, ApplySummary};
pub use utils::L10nError;

// 常量定义
pub const SUPPORTED_EXTENSIONS: &[&str] = &["ks"];
