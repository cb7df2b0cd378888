// ==========================================
// 每日排程齐套模拟 - 判定文本与汇总文本
// ==========================================
// 职责: 展示层格式化（缺料截断在这里做，判定本身保留全量）
// ==========================================

use crate::domain::verdict::{LineVerdict, RunStatistics};

/// 单元格文本中最多展示的缺料条数
pub const DISPLAY_SHORTAGE_LIMIT: usize = 2;

pub const NO_ERP_DATA_TEXT: &str = "no ERP data";

/// 生成单行判定文本（默认截断）
///
/// 形如 `kit rate:50% | producible:3 | short:螺丝(short:28.0)`
pub fn format_verdict_text(verdict: &LineVerdict) -> String {
    format_verdict_text_with_limit(verdict, DISPLAY_SHORTAGE_LIMIT)
}

pub fn format_verdict_text_with_limit(verdict: &LineVerdict, limit: usize) -> String {
    if verdict.erp_data_missing {
        return NO_ERP_DATA_TEXT.to_string();
    }

    let mut text = format!(
        "kit rate:{:.0}% | producible:{}",
        verdict.kit_rate * 100.0,
        verdict.possible_sets
    );

    if !verdict.fully_kitted {
        let shown: Vec<String> = verdict
            .shortages
            .iter()
            .take(limit)
            .map(|s| format!("{}(short:{:.1})", s.display_name(), s.short_qty))
            .collect();
        text.push_str(" | short:");
        text.push_str(&shown.join(","));
        if verdict.shortages.len() > limit {
            text.push_str("...");
        }
    }

    text
}

/// 生成运行汇总文本
pub fn format_run_summary(date_label: &str, stats: &RunStatistics) -> String {
    let mut lines = vec![
        format!("date: {}", date_label),
        format!("total lines: {}", stats.total_lines),
        format!("fully kitted lines: {}", stats.kitted_lines),
        format!("overall kit rate: {:.1}%", stats.kit_ratio() * 100.0),
        String::new(),
        "--- per workshop ---".to_string(),
    ];

    for (group, g) in &stats.groups {
        lines.push(format!(
            "{}: {:.1}% ({}/{})",
            group,
            g.kit_ratio() * 100.0,
            g.kitted,
            g.total
        ));
    }

    lines.join("\n")
}
