/// 目录级操作
///
/// 递归查找 `.ks` 文件，按规范化相对路径的字典序依次处理，一次只处理一个文件。

use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use crate::scenario::Scenario;
use crate::string_types::{ExtractedString, StringKind};
use crate::table::{build_records, TranslationMap};
use crate::utils::{relative_key, L10nError};
use crate::SUPPORTED_EXTENSIONS;

/// 回填结果摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// 写出的文件数
    pub files_written: usize,
    /// 有改动的文件数
    pub files_changed: usize,
    /// 改动的行数
    pub lines_changed: usize,
}

/// 恒等翻译下发生变化的行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripMismatch {
    pub file: String,
    pub line: usize,
    pub original: String,
    pub rebuilt: String,
}

/// 判断路径是否为场景文件
pub fn is_scenario_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s)))
        .unwrap_or(false)
}

/// 查找目录下的所有场景文件（按相对路径排序）
pub fn discover_scenarios(root: &Path) -> Result<Vec<PathBuf>, L10nError> {
    if !root.is_dir() {
        return Err(L10nError::InvalidPath(format!("输入目录不存在: {}", root.display())));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && is_scenario_file(entry.path()) {
            let key = relative_key(root, entry.path())?;
            files.push((key, entry.into_path()));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// 加载目录下的所有场景
pub fn load_scenarios(root: &Path) -> Result<Vec<Scenario>, L10nError> {
    discover_scenarios(root)?
        .iter()
        .map(|path| Scenario::load(root, path))
        .collect()
}

/// 提取目录下所有场景的可翻译字符串
///
/// 没有场景文件时返回空列表。
pub fn extract_directory(root: &Path) -> Result<Vec<ExtractedString>, L10nError> {
    let scenarios = load_scenarios(root)?;

    let strings: Vec<ExtractedString> = scenarios
        .iter()
        .flat_map(Scenario::extract_strings)
        .collect();

    tracing::info!("在 {} 个文件中找到 {} 个可翻译字符串", scenarios.len(), strings.len());
    Ok(strings)
}

/// 将翻译回填到目录下的所有场景，输出到 `output_root` 下的同名相对路径
pub fn apply_directory(
    input_root: &Path,
    translations: &TranslationMap,
    output_root: &Path,
) -> Result<ApplySummary, L10nError> {
    let files = discover_scenarios(input_root)?;
    std::fs::create_dir_all(output_root)?;

    let mut summary = ApplySummary::default();
    for path in &files {
        let scenario = Scenario::load(input_root, path)?;
        let translated = scenario.apply_translations(translations);

        let changed = scenario.changed_lines(&translated).len();
        if changed > 0 {
            summary.files_changed += 1;
            summary.lines_changed += changed;
        }

        translated.write_to_file(output_root)?;
        summary.files_written += 1;
    }

    tracing::info!(
        "已写出 {} 个文件（{} 个有改动，共 {} 行）到 {}",
        summary.files_written,
        summary.files_changed,
        summary.lines_changed,
        output_root.display()
    );
    Ok(summary)
}

/// 恒等翻译检查
///
/// 把每条字符串的译文设为原文后回填，返回发生变化的行。
/// 对白行中除 `[emb]` 和行尾 `[p]` 以外的行内标签会丢失，这类行会出现在结果中。
pub fn verify_scenario(scenario: &Scenario) -> Vec<RoundTripMismatch> {
    let mut records = build_records(&scenario.extract_strings());
    for record in &mut records {
        record.translation = record.original.clone();
    }

    let rebuilt = scenario.apply_translations(&TranslationMap::from_records(&records));

    scenario
        .changed_lines(&rebuilt)
        .into_iter()
        .map(|line| RoundTripMismatch {
            file: scenario.relative_path.clone(),
            line,
            original: scenario.lines.get(line - 1).cloned().unwrap_or_default(),
            rebuilt: rebuilt.lines.get(line - 1).cloned().unwrap_or_default(),
        })
        .collect()
}

/// 对目录下的所有场景做恒等翻译检查
pub fn verify_round_trip(root: &Path) -> Result<Vec<RoundTripMismatch>, L10nError> {
    Ok(load_scenarios(root)?
        .iter()
        .flat_map(verify_scenario)
        .collect())
}

/// 按种类统计提取结果
pub fn count_by_kind(strings: &[ExtractedString], kind: StringKind) -> usize {
    strings.iter().filter(|s| s.kind == kind).count()
}
