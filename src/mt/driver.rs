//! 批量机器翻译
//!
//! 只填写"原文非空、译文为空"的行，按批处理，批与批之间等待固定间隔。
//! 定期把整张表写回输出文件，中断后可以从输出文件继续。

use super::translator::Translator;
use crate::io::{TableReader, TableStore, TableWriter};
use crate::table::{CellValue, TableRow, ORIGINAL_COLUMN, TRANSLATION_COLUMN};
use crate::utils::{create_backup, preview, L10nError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 批量翻译参数
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// 每批行数
    pub batch_size: usize,
    /// 批间等待
    pub delay: Duration,
    /// 每翻译多少行保存一次
    pub save_every: usize,
    /// 该文件存在时暂停
    pub pause_file: Option<PathBuf>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            delay: Duration::from_millis(500),
            save_every: 50,
            pause_file: None,
        }
    }
}

/// 批量翻译结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverReport {
    /// 表中数据行总数
    pub total_rows: usize,
    /// 开始前已有译文的行数
    pub already_translated: usize,
    /// 本次需要翻译的行数
    pub pending: usize,
    /// 成功翻译的行数
    pub translated: usize,
    /// 翻译失败（保持为空）的行数
    pub failed: usize,
    /// 保存次数
    pub checkpoints: usize,
    /// 是否被中断
    pub interrupted: bool,
}

/// 批量翻译器
pub struct BatchTranslator<'a> {
    translator: &'a dyn Translator,
    options: DriverOptions,
    stop: Arc<AtomicBool>,
}

impl<'a> BatchTranslator<'a> {
    pub fn new(translator: &'a dyn Translator, options: DriverOptions) -> Self {
        Self {
            translator,
            options,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 使用外部的中断标志（例如 Ctrl+C 处理函数设置的标志）
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    fn stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// 需要翻译的行下标
    pub fn pending_rows(rows: &[TableRow]) -> Vec<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, row)| needs_translation(row))
            .map(|(index, _)| index)
            .collect()
    }

    /// 翻译内存中的表
    ///
    /// `checkpoint` 在每翻译 `save_every` 行后和结束时（包括中断）被调用。
    pub fn run<F>(&self, rows: &mut [TableRow], mut checkpoint: F) -> Result<DriverReport, L10nError>
    where
        F: FnMut(&[TableRow]) -> Result<(), L10nError>,
    {
        let pending = Self::pending_rows(rows);
        let mut report = DriverReport {
            total_rows: rows.len(),
            already_translated: rows.iter().filter(|row| has_translation(row)).count(),
            pending: pending.len(),
            ..DriverReport::default()
        };

        tracing::info!(
            "{}: 共 {} 行，已翻译 {} 行，待翻译 {} 行",
            self.translator.provider_name(),
            report.total_rows,
            report.already_translated,
            report.pending
        );

        let batch_size = self.options.batch_size.max(1);
        let save_every = self.options.save_every.max(1);
        let mut since_save = 0;
        let mut done = 0;

        'batches: for (batch_index, batch) in pending.chunks(batch_size).enumerate() {
            if batch_index > 0 && !self.options.delay.is_zero() {
                std::thread::sleep(self.options.delay);
            }
            self.wait_while_paused();

            for &index in batch {
                if self.stopped() {
                    break 'batches;
                }

                let original = rows[index][ORIGINAL_COLUMN].as_text();
                let text = original.trim();
                let translation = match self.translator.translate(text) {
                    Ok(translated) => {
                        report.translated += 1;
                        translated
                    }
                    Err(e) => {
                        tracing::warn!("翻译失败（第 {} 行）: {}: {}", index + 2, preview(text, 40), e);
                        report.failed += 1;
                        String::new()
                    }
                };
                set_translation(&mut rows[index], translation);

                done += 1;
                since_save += 1;
                if since_save >= save_every {
                    checkpoint(rows)?;
                    report.checkpoints += 1;
                    since_save = 0;
                }
            }

            let last = batch.last().map(|&i| rows[i][TRANSLATION_COLUMN].as_text()).unwrap_or_default();
            tracing::info!(
                "[{}/{}] {:.1}% 最近: {}",
                done,
                report.pending,
                done as f64 * 100.0 / report.pending as f64,
                preview(&last, 40)
            );
        }

        report.interrupted = self.stopped();
        if report.interrupted {
            tracing::warn!("已中断，保存进度（{}/{}）", done, report.pending);
        }

        checkpoint(rows)?;
        report.checkpoints += 1;
        Ok(report)
    }

    /// 翻译表格文件，结果写入 `output`
    ///
    /// `output` 已存在时视为上次中断的进度：先备份，再从它继续。
    pub fn translate_table(
        &self,
        store: &dyn TableStore,
        input: &Path,
        output: &Path,
    ) -> Result<DriverReport, L10nError> {
        let source = if output.exists() {
            let backup = create_backup(output)?;
            tracing::info!("从已有输出继续: {}（备份: {}）", output.display(), backup.display());
            output
        } else {
            input
        };

        let mut rows = store.read_rows(source)?;
        self.run(&mut rows, |rows| store.write_rows(rows, output))
    }

    fn wait_while_paused(&self) {
        let Some(pause_file) = &self.options.pause_file else {
            return;
        };

        if pause_file.exists() {
            tracing::info!("检测到 {}，已暂停（删除该文件后继续）", pause_file.display());
        }
        while pause_file.exists() && !self.stopped() {
            std::thread::sleep(PAUSE_POLL_INTERVAL);
        }
    }
}

/// `<stem>_translated.<ext>`
pub fn translated_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("translations");
    let file_name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_translated.{}", stem, ext),
        None => format!("{}_translated", stem),
    };
    input.with_file_name(file_name)
}

fn has_translation(row: &TableRow) -> bool {
    row.get(TRANSLATION_COLUMN).map(|cell| !cell.is_blank()).unwrap_or(false)
}

fn needs_translation(row: &TableRow) -> bool {
    let has_original = row.get(ORIGINAL_COLUMN).map(|cell| !cell.is_blank()).unwrap_or(false);
    has_original && !has_translation(row)
}

fn set_translation(row: &mut TableRow, translation: String) {
    if row.len() <= TRANSLATION_COLUMN {
        row.resize(TRANSLATION_COLUMN + 1, CellValue::Empty);
    }
    row[TRANSLATION_COLUMN] = CellValue::String(translation);
}
