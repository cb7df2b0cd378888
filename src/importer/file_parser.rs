// ==========================================
// 每日排程齐套模拟 - 文件解析器
// ==========================================
// 支持: Excel (.xlsx/.xlsm/.xls/.ods) / CSV (.csv)
// 输出: 带类型的单元格网格，保留绝对行列号
// ==========================================

use crate::importer::date_header::excel_serial_to_date;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::grid::{CellValue, SheetGrid};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Csv,
    Workbook,
}

fn detect_kind(path: &Path) -> ImportResult<FileKind> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(FileKind::Csv),
        "xlsx" | "xlsm" | "xls" | "ods" => Ok(FileKind::Workbook),
        _ => Err(ImportError::UnsupportedFormat(ext)),
    }
}

// ==========================================
// GridReader - 通用网格读取（根据扩展名自动选择）
// ==========================================
pub struct GridReader;

impl GridReader {
    /// 列出工作表名称；CSV 只有一个以文件名命名的伪工作表
    pub fn sheet_names(path: &Path) -> ImportResult<Vec<String>> {
        match detect_kind(path)? {
            FileKind::Csv => Ok(vec![csv_sheet_name(path)]),
            FileKind::Workbook => {
                let workbook = open_workbook_auto(path)?;
                Ok(workbook.sheet_names())
            }
        }
    }

    /// 读取工作表
    ///
    /// # 参数
    /// - path: 文件路径
    /// - sheet: 工作表名（None 取第一个；CSV 忽略）
    pub fn open(path: &Path, sheet: Option<&str>) -> ImportResult<SheetGrid> {
        match detect_kind(path)? {
            FileKind::Csv => read_csv(path),
            FileKind::Workbook => read_workbook(path, sheet),
        }
    }
}

fn csv_sheet_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "csv".to_string())
}

// ==========================================
// CSV 读取
// ==========================================
fn read_csv(path: &Path) -> ImportResult<SheetGrid> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // 允许行长度不一致
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(CellValue::from_csv_field).collect());
    }

    debug!(path = %path.display(), rows = rows.len(), "CSV 读取完成");
    Ok(SheetGrid::new(0, 0, rows))
}

// ==========================================
// Excel 读取
// ==========================================
fn read_workbook(path: &Path, sheet: Option<&str>) -> ImportResult<SheetGrid> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(ImportError::SheetNotFound {
                    sheet: name.to_string(),
                    available: sheet_names,
                });
            }
            name.to_string()
        }
        None => sheet_names.first().cloned().ok_or(ImportError::EmptyWorkbook)?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;

    // range 从第一个非空单元格开始，记录其绝对位置
    let (origin_row, origin_col) = range.start().unwrap_or((0, 0));
    let rows: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        origin_row,
        origin_col,
        rows = rows.len(),
        "工作表读取完成"
    );
    Ok(SheetGrid::new(origin_row, origin_col, rows))
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::DateTime(dt) => {
            if dt.is_duration() {
                CellValue::Number(dt.as_f64())
            } else {
                excel_serial_to_date(dt.as_f64())
                    .map(CellValue::Date)
                    .unwrap_or(CellValue::Number(dt.as_f64()))
            }
        }
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_csv_grid() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "标题,,").unwrap();
        writeln!(temp_file, "车间,单别,工单单号").unwrap();
        writeln!(temp_file, "装配一,5101,A001,12").unwrap();

        let grid = GridReader::open(temp_file.path(), None).unwrap();
        assert_eq!(grid.last_row(), 3);
        assert_eq!(grid.cell(2, 3), &CellValue::Text("工单单号".to_string()));
        assert_eq!(grid.cell(3, 2), &CellValue::Number(5101.0));
        assert_eq!(grid.cell(3, 4), &CellValue::Number(12.0));
    }

    #[test]
    fn test_csv_sheet_name() {
        let temp_file = Builder::new().prefix("plan").suffix(".csv").tempfile().unwrap();
        let names = GridReader::sheet_names(temp_file.path()).unwrap();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("plan"));
    }

    #[test]
    fn test_file_not_found() {
        let result = GridReader::open(Path::new("non_existent.csv"), None);
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_format() {
        let temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = GridReader::open(temp_file.path(), None);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
