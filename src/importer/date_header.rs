// ==========================================
// 每日排程齐套模拟 - 日期表头解析
// ==========================================
// 支持: 日期单元格 / Excel 序列号 / "Y/M/D" / "YYYY-MM-DD" / "M/D"
// "M/D" 不带年份，保留原文作为 MonthDay 标签，不推断年份
// ==========================================

use crate::domain::types::DateLabel;
use crate::importer::grid::CellValue;
use chrono::{Duration, NaiveDate};

/// Excel 序列号 → 日期（1899-12-30 + 整数天）
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= 0.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// 解析日期行中的单元格；不是日期返回 None
pub fn parse_date_header(cell: &CellValue) -> Option<DateLabel> {
    match cell {
        CellValue::Date(d) => Some(DateLabel::Calendar(*d)),
        CellValue::Number(n) => excel_serial_to_date(*n).map(DateLabel::Calendar),
        CellValue::Text(s) => parse_date_text(s),
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}

fn parse_date_text(raw: &str) -> Option<DateLabel> {
    let s = raw.trim();
    let parts: Vec<&str> = s.split('/').collect();
    match parts.len() {
        2 if parts.iter().all(|p| is_small_number(p)) => Some(DateLabel::MonthDay(s.to_string())),
        3 => NaiveDate::parse_from_str(s, "%Y/%m/%d").ok().map(DateLabel::Calendar),
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(DateLabel::Calendar),
    }
}

fn is_small_number(part: &str) -> bool {
    !part.is_empty() && part.len() <= 2 && part.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_excel_serial() {
        // 46047 = 2026-01-25
        assert_eq!(excel_serial_to_date(46047.0), Some(ymd(2026, 1, 25)));
        assert_eq!(excel_serial_to_date(46047.75), Some(ymd(2026, 1, 25)));
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn test_parse_cells() {
        assert_eq!(
            parse_date_header(&CellValue::Date(ymd(2026, 1, 26))),
            Some(DateLabel::Calendar(ymd(2026, 1, 26)))
        );
        assert_eq!(
            parse_date_header(&CellValue::Text("2026/1/27".to_string())),
            Some(DateLabel::Calendar(ymd(2026, 1, 27)))
        );
        assert_eq!(
            parse_date_header(&CellValue::Text("2026-01-28".to_string())),
            Some(DateLabel::Calendar(ymd(2026, 1, 28)))
        );
        assert_eq!(
            parse_date_header(&CellValue::Text(" 1/25 ".to_string())),
            Some(DateLabel::MonthDay("1/25".to_string()))
        );
    }

    #[test]
    fn test_non_dates() {
        assert_eq!(parse_date_header(&CellValue::Empty), None);
        assert_eq!(parse_date_header(&CellValue::Text("合计".to_string())), None);
        assert_eq!(parse_date_header(&CellValue::Text("a/b".to_string())), None);
        assert_eq!(parse_date_header(&CellValue::Text("2026/13/40".to_string())), None);
    }
}
