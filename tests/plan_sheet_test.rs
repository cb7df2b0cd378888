// ==========================================
// 计划表读取集成测试
// ==========================================
// 职责: 验证 CSV / Excel 计划表的表头识别、日期列识别、计划行抽取
// 夹具: tests/fixtures/plans/daily_plan.xlsx
//   - 排程: A1 起，D3 为日期格式单元格 (2026-01-25)，E3 为文本 "1/26"
//   - 偏移: B2 起，E3 为日期格式单元格 (2026-01-26)
// ==========================================


use chrono::NaiveDate;
use kitting_sim::config::SheetLayout;
use kitting_sim::importer::{CellValue, GridReader, ImportError, PlanSheet};
use kitting_sim::{DateLabel, LineId, WorkOrderKey, WorkshopFilter};
use std::path::PathBuf;
use tempfile::TempDir;
use test_helpers::write_plan_csv;

fn sample_plan(dir: &TempDir) -> std::path::PathBuf {
    write_plan_csv(
        dir,
        &["2026-01-25", "1/26"],
        &[
            ("一车间", "5101", "WO-001", vec!["10", "0"]),
            ("", "5101", "WO-002", vec!["5", "3"]),
            ("二车间", "5101", "WO-003", vec!["abc", "2"]),
            ("二车间", "", "WO-004", vec!["4", ""]),
            ("二车间", "5102", "0007", vec!["2.5", ""]),
        ],
    )
}

fn jan25() -> DateLabel {
    DateLabel::Calendar(NaiveDate::from_ymd_opt(2026, 1, 25).unwrap())
}

#[test]
fn test_dates_and_workshops() {
    let dir = TempDir::new().unwrap();
    let path = sample_plan(&dir);

    let plan = PlanSheet::open(&path, None, SheetLayout::default()).unwrap();
    assert_eq!(plan.dates(), vec![jan25(), DateLabel::MonthDay("1/26".to_string())]);
    assert_eq!(plan.workshops(), vec!["一车间".to_string(), "二车间".to_string()]);
    assert_eq!(plan.column("工单单号"), Some(3));

    assert_eq!(GridReader::sheet_names(&path).unwrap(), vec!["plan".to_string()]);
}

#[test]
fn test_load_plan_lines_all_workshops() {
    let dir = TempDir::new().unwrap();
    let plan = PlanSheet::open(&sample_plan(&dir), None, SheetLayout::default()).unwrap();

    let lines = plan.load_plan_lines(&jan25(), &WorkshopFilter::All).unwrap();
    let ids: Vec<LineId> = lines.iter().map(|l| l.line_id).collect();
    assert_eq!(ids, vec![LineId(4), LineId(5), LineId(8)]);

    assert_eq!(lines[0].work_order, WorkOrderKey::new("5101", "WO-001"));
    assert_eq!(lines[0].requested_qty, 10.0);
    // 空车间归入“未分类”
    assert_eq!(lines[1].group, "未分类");
    // 前导零的工单号保持原样
    assert_eq!(lines[2].work_order, WorkOrderKey::new("5102", "0007"));
    assert_eq!(lines[2].requested_qty, 2.5);
}

#[test]
fn test_load_plan_lines_with_filter_and_month_day() {
    let dir = TempDir::new().unwrap();
    let plan = PlanSheet::open(&sample_plan(&dir), None, SheetLayout::default()).unwrap();

    let only = WorkshopFilter::Only("二车间".to_string());
    let lines = plan.load_plan_lines(&jan25(), &only).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].line_id, LineId(8));

    let lines = plan
        .load_plan_lines(&DateLabel::MonthDay("1/26".to_string()), &WorkshopFilter::All)
        .unwrap();
    let ids: Vec<LineId> = lines.iter().map(|l| l.line_id).collect();
    assert_eq!(ids, vec![LineId(5), LineId(6)]);
}

#[test]
fn test_unknown_date_column() {
    let dir = TempDir::new().unwrap();
    let plan = PlanSheet::open(&sample_plan(&dir), None, SheetLayout::default()).unwrap();

    let err = plan
        .load_plan_lines(&DateLabel::MonthDay("2/1".to_string()), &WorkshopFilter::All)
        .unwrap_err();
    assert!(matches!(err, ImportError::UnknownDateColumn(_)));
}

#[test]
fn test_missing_key_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "title,,\n车间,工单,2026-01-25\n,,\n").unwrap();

    let err = PlanSheet::open(&path, None, SheetLayout::default()).unwrap_err();
    match err {
        ImportError::MissingColumns { row, columns } => {
            assert_eq!(row, 2);
            assert_eq!(columns, vec!["单别".to_string(), "工单单号".to_string()]);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unsupported_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.txt");
    std::fs::write(&path, "x").unwrap();

    let err = PlanSheet::open(&path, None, SheetLayout::default()).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}

// ==========================================
// Excel 工作簿
// ==========================================

fn workbook_fixture() -> PathBuf {
    PathBuf::from("tests/fixtures/plans/daily_plan.xlsx")
}

#[test]
fn test_workbook_sheet_names() {
    let names = GridReader::sheet_names(&workbook_fixture()).unwrap();
    assert_eq!(names, vec!["排程".to_string(), "偏移".to_string()]);
}

#[test]
fn test_workbook_date_cells_and_month_day_text() {
    let path = workbook_fixture();

    // 日期格式单元格转换为日期，"M/D" 文本保持原样
    let grid = GridReader::open(&path, Some("排程")).unwrap();
    assert_eq!(
        grid.cell(3, 4),
        &CellValue::Date(NaiveDate::from_ymd_opt(2026, 1, 25).unwrap())
    );
    assert_eq!(grid.cell(3, 5), &CellValue::Text("1/26".to_string()));

    // 不指定工作表时取第一个
    let plan = PlanSheet::open(&path, None, SheetLayout::default()).unwrap();
    assert_eq!(plan.dates(), vec![jan25(), DateLabel::MonthDay("1/26".to_string())]);
    assert_eq!(plan.workshops(), vec!["一车间".to_string(), "二车间".to_string()]);

    let lines = plan.load_plan_lines(&jan25(), &WorkshopFilter::All).unwrap();
    let ids: Vec<LineId> = lines.iter().map(|l| l.line_id).collect();
    assert_eq!(ids, vec![LineId(4), LineId(5)]);
    assert_eq!(lines[0].work_order, WorkOrderKey::new("5101", "WO-001"));
    assert_eq!(lines[0].requested_qty, 10.0);

    let lines = plan
        .load_plan_lines(&DateLabel::MonthDay("1/26".to_string()), &WorkshopFilter::All)
        .unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].line_id, LineId(6));
    assert_eq!(lines[1].group, "未分类");
    assert_eq!(lines[1].work_order, WorkOrderKey::new("5102", "0007"));
}

#[test]
fn test_workbook_sheet_with_offset_origin() {
    let path = workbook_fixture();
    let plan = PlanSheet::open(&path, Some("偏移"), SheetLayout::default()).unwrap();

    // 数据从 B2 开始，行列号仍按表内绝对位置
    assert_eq!(plan.column("车间"), Some(2));
    assert_eq!(plan.column("工单单号"), Some(4));

    let jan26 = DateLabel::Calendar(NaiveDate::from_ymd_opt(2026, 1, 26).unwrap());
    assert_eq!(plan.dates(), vec![jan26.clone()]);

    let lines = plan.load_plan_lines(&jan26, &WorkshopFilter::All).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].line_id, LineId(4));
    assert_eq!(lines[0].work_order, WorkOrderKey::new("5101", "WO-003"));
    assert_eq!(lines[0].requested_qty, 7.0);
    assert_eq!(lines[0].group, "三车间");
}

#[test]
fn test_workbook_unknown_sheet() {
    let err = PlanSheet::open(&workbook_fixture(), Some("不存在"), SheetLayout::default()).unwrap_err();
    match err {
        ImportError::SheetNotFound { sheet, available } => {
            assert_eq!(sheet, "不存在");
            assert_eq!(available, vec!["排程".to_string(), "偏移".to_string()]);
        }
        other => panic!("unexpected error: {}", other),
    }
}
