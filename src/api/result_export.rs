// ==========================================
// 每日排程齐套模拟 - 结果导出
// ==========================================
// CSV: 每个计划行一行，供表格工具回填
// JSON: 完整报告（含配置快照、统计、剩余库存）
// ==========================================

use crate::api::error::ApiResult;
use crate::api::kitting_api::AnalysisReport;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// CSV 行结构（列名即字段名）
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    row: usize,
    order_type: &'a str,
    order_no: &'a str,
    workshop: &'a str,
    requested_qty: f64,
    fully_kitted: bool,
    kit_rate: f64,
    possible_sets: u64,
    erp_data_missing: bool,
    display_text: &'a str,
}

/// 导出逐行结果为 CSV，返回写出的行数
pub fn export_results_csv(path: &Path, report: &AnalysisReport) -> ApiResult<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    for line in &report.lines {
        writer.serialize(CsvRow {
            row: line.line_id.0,
            order_type: &line.work_order.order_type,
            order_no: &line.work_order.order_no,
            workshop: &line.workshop,
            requested_qty: line.requested_qty,
            fully_kitted: line.verdict.fully_kitted,
            kit_rate: line.verdict.kit_rate,
            possible_sets: line.verdict.possible_sets,
            erp_data_missing: line.verdict.erp_data_missing,
            display_text: &line.display_text,
        })?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = report.lines.len(), "CSV 结果已导出");
    Ok(report.lines.len())
}

/// 导出完整报告为 JSON
pub fn export_report_json(path: &Path, report: &AnalysisReport) -> ApiResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), run_id = %report.run_id, "JSON 报告已导出");
    Ok(())
}
