//! 目录级集成测试
//!
//! 提取 → 写出翻译表 → 填写译文 → 读回 → 回填，覆盖 XLSX 和 JSON 两种格式。

use std::path::Path;
use tempfile::TempDir;
use tyrano_l10n::io::{table_store_for, JsonTable, TableReader, TableWriter, XlsxTable};
use tyrano_l10n::mt::{BatchTranslator, DriverOptions, MockMode, MockTranslator};
use tyrano_l10n::project::{apply_directory, extract_directory, verify_round_trip};
use tyrano_l10n::table::{build_records, records_to_rows, CellValue, TranslationMap, TRANSLATION_COLUMN};
use tyrano_l10n::StringKind;

const FIRST: &str = "*start\r\n\
[tb_start_text mode=1 ]\r\n\
#Alice\r\n\
Hello[emb exp=\"f.name\"][p]\r\n\
[_tb_end_text]\r\n\
[glink text=\"Go&nbsp;home\" target=\"*home\"]\r\n";

const SECOND: &str = "[tb_start_text mode=1 ]\n\
#\n\
The door creaks.[p]\n\
[_tb_end_text]\n\
[glink text=\"Go&nbsp;home\"] [glink text=\"Stay\"]";

fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let scenes = dir.path().join("input/scene");
    std::fs::create_dir_all(&scenes).unwrap();
    std::fs::write(dir.path().join("input/first.ks"), FIRST).unwrap();
    std::fs::write(scenes.join("second.ks"), SECOND).unwrap();
    std::fs::write(scenes.join("readme.txt"), "[tb_start_text]\n#Ignored\n").unwrap();
    dir
}

fn fill_translations(rows: &mut [Vec<CellValue>]) {
    for row in rows.iter_mut() {
        let translation = match row[4].as_text().as_str() {
            "Alice" => "Алиса",
            "Hello" => "Привет",
            "The door creaks." => "Дверь скрипит.",
            "Go home" => "Домой",
            _ => continue,
        };
        row[TRANSLATION_COLUMN] = CellValue::from(translation);
    }
}

fn run_pipeline(root: &Path, table: &Path) -> (String, String) {
    let input = root.join("input");
    let strings = extract_directory(&input).unwrap();
    let store = table_store_for(table).unwrap();
    store.write_rows(&records_to_rows(&build_records(&strings)), table).unwrap();

    let mut rows = store.read_rows(table).unwrap();
    fill_translations(&mut rows);
    store.write_rows(&rows, table).unwrap();

    let map = TranslationMap::from_rows(&store.read_rows(table).unwrap());
    let output = root.join("output");
    let summary = apply_directory(&input, &map, &output).unwrap();
    assert_eq!(summary.files_written, 2);
    assert_eq!(summary.files_changed, 2);

    (
        std::fs::read_to_string(output.join("first.ks")).unwrap(),
        std::fs::read_to_string(output.join("scene/second.ks")).unwrap(),
    )
}

#[test]
fn test_extract_directory_order_and_kinds() {
    let dir = setup_project();
    let strings = extract_directory(&dir.path().join("input")).unwrap();

    let summary: Vec<(String, usize, StringKind, String)> = strings
        .iter()
        .map(|s| (s.file.clone(), s.line, s.kind, s.original.clone()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("first.ks".to_string(), 3, StringKind::CharacterName, "Alice".to_string()),
            ("first.ks".to_string(), 4, StringKind::Dialogue, "Hello".to_string()),
            ("first.ks".to_string(), 6, StringKind::Button, "Go home".to_string()),
            ("scene/second.ks".to_string(), 3, StringKind::Dialogue, "The door creaks.".to_string()),
            ("scene/second.ks".to_string(), 5, StringKind::Button, "Go home".to_string()),
            ("scene/second.ks".to_string(), 5, StringKind::Button, "Stay".to_string()),
        ]
    );
    assert_eq!(strings[0].context, "Text block starting line 2");
    assert_eq!(strings[2].context, "Menu button / glink");
}

#[test]
fn test_full_round_trip_through_xlsx() {
    let dir = setup_project();
    let (first, second) = run_pipeline(dir.path(), &dir.path().join("translations.xlsx"));

    assert_eq!(
        first,
        "*start\r\n\
[tb_start_text mode=1 ]\r\n\
#Алиса\r\n\
Привет[emb exp=\"f.name\"][p]\r\n\
[_tb_end_text]\r\n\
[glink text=\"Домой\" target=\"*home\"]\r\n"
    );
    assert_eq!(
        second,
        "[tb_start_text mode=1 ]\n\
#\n\
Дверь скрипит.[p]\n\
[_tb_end_text]\n\
[glink text=\"Домой\"] [glink text=\"Stay\"]"
    );
}

#[test]
fn test_full_round_trip_through_json() {
    let dir = setup_project();
    let xlsx_dir = setup_project();

    let from_json = run_pipeline(dir.path(), &dir.path().join("translations.json"));
    let from_xlsx = run_pipeline(xlsx_dir.path(), &xlsx_dir.path().join("translations.xlsx"));
    assert_eq!(from_json, from_xlsx);
}

#[test]
fn test_empty_table_leaves_files_identical() {
    let dir = setup_project();
    let input = dir.path().join("input");
    let output = dir.path().join("output");

    let summary = apply_directory(&input, &TranslationMap::new(), &output).unwrap();
    assert_eq!(summary.files_changed, 0);
    assert_eq!(std::fs::read_to_string(output.join("first.ks")).unwrap(), FIRST);
    assert_eq!(std::fs::read_to_string(output.join("scene/second.ks")).unwrap(), SECOND);
    assert!(!output.join("scene/readme.txt").exists());
}

#[test]
fn test_empty_directory_has_no_strings() {
    let dir = TempDir::new().unwrap();
    assert!(extract_directory(dir.path()).unwrap().is_empty());
    assert!(verify_round_trip(dir.path()).unwrap().is_empty());
}

#[test]
fn test_identity_round_trip_is_clean() {
    let dir = setup_project();
    assert!(verify_round_trip(&dir.path().join("input")).unwrap().is_empty());
}

#[test]
fn test_machine_translation_then_apply() {
    let dir = setup_project();
    let input = dir.path().join("input");
    let table = dir.path().join("translations.json");
    let output_table = dir.path().join("translations_translated.json");

    let strings = extract_directory(&input).unwrap();
    JsonTable.write_rows(&records_to_rows(&build_records(&strings)), &table).unwrap();

    let mock = MockTranslator::new(MockMode::Suffix, "ru");
    let options = DriverOptions {
        delay: std::time::Duration::ZERO,
        ..DriverOptions::default()
    };
    let report = BatchTranslator::new(&mock, options)
        .translate_table(&JsonTable, &table, &output_table)
        .unwrap();
    assert_eq!(report.translated, strings.len());

    let map = TranslationMap::from_rows(&JsonTable.read_rows(&output_table).unwrap());
    apply_directory(&input, &map, &dir.path().join("output")).unwrap();

    let second = std::fs::read_to_string(dir.path().join("output/scene/second.ks")).unwrap();
    assert!(second.contains("The door creaks._ru[p]\n"));
    // 同一文件中相同文本的按钮共用译文
    assert!(second.contains("[glink text=\"Go&nbsp;home_ru\"] [glink text=\"Stay_ru\"]"));
}

#[test]
fn test_xlsx_reads_back_written_rows() {
    let dir = setup_project();
    let path = dir.path().join("t.xlsx");
    let strings = extract_directory(&dir.path().join("input")).unwrap();
    let rows = records_to_rows(&build_records(&strings));

    XlsxTable.write_rows(&rows, &path).unwrap();
    let read = XlsxTable.read_rows(&path).unwrap();

    assert_eq!(read.len(), rows.len());
    let map_rows: Vec<String> = read.iter().map(|row| row[4].as_text()).collect();
    assert_eq!(map_rows[0], "Alice");
    assert_eq!(read[1][2].as_line(), Some(4));
}

#[test]
fn test_block_state_resets_between_files() {
    let dir = TempDir::new().unwrap();
    // a.ks 的文本块没有关闭
    std::fs::write(dir.path().join("a.ks"), "[tb_start_text mode=1 ]\n#Alice\nStill talking[p]\n").unwrap();
    std::fs::write(dir.path().join("b.ks"), "Prose outside any block\n#NotAName\n[glink text=\"Go\"]\n").unwrap();

    let strings = extract_directory(dir.path()).unwrap();

    let from_a: Vec<StringKind> = strings.iter().filter(|s| s.file == "a.ks").map(|s| s.kind).collect();
    assert_eq!(from_a, vec![StringKind::CharacterName, StringKind::Dialogue]);

    let from_b: Vec<(StringKind, &str)> = strings
        .iter()
        .filter(|s| s.file == "b.ks")
        .map(|s| (s.kind, s.original.as_str()))
        .collect();
    assert_eq!(from_b, vec![(StringKind::Button, "Go")]);
}
