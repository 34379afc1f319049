/// XLSX 翻译表实现
///
/// 读取使用 calamine（第一个工作表），写入使用 rust_xlsxwriter 并附带样式：
/// 表头蓝底白字、按类型着色、译文列蓝色字体、说明列灰色斜体、冻结表头、自动筛选。

use std::path::Path;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use super::traits::{TableReader, TableWriter};
use crate::string_types::StringKind;
use crate::table::{CellValue, TableRow, TABLE_HEADERS};
use crate::utils::L10nError;

/// 工作表名称
pub const SHEET_NAME: &str = "Translations";

/// 各列宽度（A..G）
const COLUMN_WIDTHS: [f64; 7] = [6.0, 30.0, 7.0, 16.0, 60.0, 60.0, 30.0];

const HEADER_FILL: u32 = 0x4472C4;
const TRANSLATION_FONT: u32 = 0x0000FF;
const CONTEXT_FONT: u32 = 0x808080;

/// 类型对应的行底色
fn kind_fill(kind: StringKind) -> u32 {
    match kind {
        StringKind::Dialogue => 0xFFFFFF,
        StringKind::CharacterName => 0xFFF2CC,
        StringKind::Button => 0xD6E4F0,
    }
}

/// XLSX 翻译表
#[derive(Debug, Clone, Default)]
pub struct XlsxTable;

impl TableReader for XlsxTable {
    fn read_rows(&self, path: &Path) -> Result<Vec<TableRow>, L10nError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| L10nError::Table(format!("{} 中没有工作表", path.display())))??;

        let rows: Vec<TableRow> = range
            .rows()
            .skip(1)
            .map(|row| row.iter().map(cell_from_data).collect())
            .collect();

        tracing::debug!("从 {} 读取了 {} 行", path.display(), rows.len());
        Ok(rows)
    }
}

impl TableWriter for XlsxTable {
    fn write_rows(&self, rows: &[TableRow], path: &Path) -> Result<(), L10nError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_name("Arial")
            .set_font_size(11)
            .set_font_color(Color::RGB(0xFFFFFF))
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        for (col, header) in TABLE_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let row_number = (index + 1) as u32;
            let fill = row.get(3)
                .and_then(|cell| cell.as_text().parse::<StringKind>().ok())
                .map(kind_fill);
            let formats = RowFormats::new(fill);

            for (col, cell) in row.iter().enumerate() {
                write_cell(worksheet, row_number, col as u16, cell, formats.for_column(col))?;
            }
        }

        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }
        worksheet.set_freeze_panes(1, 0)?;
        worksheet.autofilter(0, 0, rows.len() as u32, (TABLE_HEADERS.len() - 1) as u16)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        workbook.save(path)?;

        tracing::debug!("已写入 {} 行到 {}", rows.len(), path.display());
        Ok(())
    }
}

/// 一行中各列使用的格式
struct RowFormats {
    plain: Format,
    wrapped: Format,
    translation: Format,
    context: Format,
}

impl RowFormats {
    fn new(fill: Option<u32>) -> Self {
        let mut plain = Format::new().set_border(FormatBorder::Thin);
        if let Some(rgb) = fill {
            plain = plain.set_background_color(Color::RGB(rgb));
        }

        let wrapped = plain.clone().set_text_wrap();
        let translation = wrapped.clone()
            .set_font_name("Arial")
            .set_font_color(Color::RGB(TRANSLATION_FONT));
        let context = plain.clone()
            .set_font_name("Arial")
            .set_italic()
            .set_font_color(Color::RGB(CONTEXT_FONT));

        Self { plain, wrapped, translation, context }
    }

    fn for_column(&self, col: usize) -> &Format {
        match col {
            4 => &self.wrapped,
            5 => &self.translation,
            6 => &self.context,
            _ => &self.plain,
        }
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    format: &Format,
) -> Result<(), L10nError> {
    match cell {
        CellValue::Empty => {
            worksheet.write_blank(row, col, format)?;
        }
        CellValue::String(s) if s.is_empty() => {
            worksheet.write_blank(row, col, format)?;
        }
        CellValue::String(s) => {
            worksheet.write_string_with_format(row, col, s.as_str(), format)?;
        }
        CellValue::Int(i) => {
            worksheet.write_number_with_format(row, col, *i as f64, format)?;
        }
        CellValue::Float(f) => {
            worksheet.write_number_with_format(row, col, *f, format)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
    }
    Ok(())
}

/// calamine 单元格 → CellValue
fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::String(s.clone()),
        other => CellValue::String(other.to_string()),
    }
}
