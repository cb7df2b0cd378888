// ==========================================
// 每日排程齐套模拟 - 齐套分析 API
// ==========================================
// 职责: 串联 计划表读取 → ERP 快照获取 → 齐套模拟 → 报告
// 红线: 本层不做判定；判定全部来自引擎
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::SheetLayoutReader;
use crate::domain::bom::BomCatalog;
use crate::domain::plan_line::PlanLine;
use crate::domain::types::{DateLabel, LineId, WorkOrderKey, WorkshopFilter};
use crate::domain::verdict::{LineVerdict, RunStatistics};
use crate::engine::{format_run_summary, format_verdict_text, AllocationSimulator};
use crate::importer::{GridReader, PlanSheet};
use crate::repository::{InventoryProvider, WorkOrderProvider};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// 请求 / 响应
// ==========================================

/// 齐套分析请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// 计划表文件路径
    pub plan_path: PathBuf,
    /// 工作表名（None 取第一张）
    pub sheet: Option<String>,
    /// 分析日期列
    pub date: DateLabel,
    /// 车间（None 或“全部车间”标签表示不筛选）
    pub workshop: Option<String>,
}

/// 单行报告
#[derive(Debug, Clone, Serialize)]
pub struct LineReport {
    /// 计划表中的行号
    pub line_id: LineId,
    pub work_order: WorkOrderKey,
    pub workshop: String,
    pub requested_qty: f64,
    pub verdict: LineVerdict,
    /// 写回单元格用的展示文本
    pub display_text: String,
}

/// 一次齐套分析的完整报告
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub date: DateLabel,
    pub workshop: WorkshopFilter,
    /// 本次运行使用的配置快照 (JSON)
    pub config_snapshot: String,
    /// 按处理顺序
    pub lines: Vec<LineReport>,
    pub statistics: RunStatistics,
    pub final_inventory: BTreeMap<String, f64>,
}

impl AnalysisReport {
    /// 运行汇总文本
    pub fn summary_text(&self) -> String {
        format_run_summary(&self.date.to_string(), &self.statistics)
    }

    /// 需要标红的行（缺料或无 ERP 数据）
    pub fn short_lines(&self) -> impl Iterator<Item = &LineReport> {
        self.lines.iter().filter(|l| l.verdict.is_short())
    }
}

// ==========================================
// KittingApi
// ==========================================

/// 齐套分析 API
///
/// 泛型参数对应三个外部依赖：配置读取、工单 BOM、库存。
pub struct KittingApi<C, W, I>
where
    C: SheetLayoutReader,
    W: WorkOrderProvider,
    I: InventoryProvider,
{
    config: Arc<C>,
    work_orders: Arc<W>,
    inventory: Arc<I>,
    simulator: AllocationSimulator,
}

impl<C, W, I> KittingApi<C, W, I>
where
    C: SheetLayoutReader,
    W: WorkOrderProvider,
    I: InventoryProvider,
{
    pub fn new(config: Arc<C>, work_orders: Arc<W>, inventory: Arc<I>) -> Self {
        Self {
            config,
            work_orders,
            inventory,
            simulator: AllocationSimulator::new(),
        }
    }

    /// 列出计划文件中的工作表
    pub fn list_sheets(&self, plan_path: &Path) -> ApiResult<Vec<String>> {
        Ok(GridReader::sheet_names(plan_path)?)
    }

    /// 列出可分析的日期列（升序）
    pub async fn list_dates(&self, plan_path: &Path, sheet: Option<&str>) -> ApiResult<Vec<DateLabel>> {
        let plan = self.open_plan(plan_path, sheet).await?;
        Ok(plan.dates())
    }

    /// 列出计划表中出现的车间（排序去重）
    pub async fn list_workshops(&self, plan_path: &Path, sheet: Option<&str>) -> ApiResult<Vec<String>> {
        let plan = self.open_plan(plan_path, sheet).await?;
        Ok(plan.workshops())
    }

    /// 执行一次齐套分析
    ///
    /// # 流程
    /// 1. 抽取所选日期/车间的计划行（为空则报 NoPlanLines）
    /// 2. 按去重后的工单键获取 BOM
    /// 3. 按 BOM 中出现的料号获取库存
    /// 4. 模拟并组装报告
    #[instrument(skip(self, request), fields(plan = %request.plan_path.display(), date = %request.date))]
    pub async fn run_analysis(&self, request: &AnalysisRequest) -> ApiResult<AnalysisReport> {
        let layout = self.config.get_sheet_layout().await?;
        let config_snapshot = self.config.get_config_snapshot_json().await?;
        let filter = WorkshopFilter::from_selection(request.workshop.as_deref(), &layout.all_workshops_label);

        let plan = PlanSheet::open(&request.plan_path, request.sheet.as_deref(), layout)?;
        let lines = plan.load_plan_lines(&request.date, &filter)?;
        if lines.is_empty() {
            return Err(ApiError::NoPlanLines {
                date: request.date.clone(),
                workshop: filter,
            });
        }

        let keys: Vec<WorkOrderKey> = lines
            .iter()
            .map(|l| l.work_order.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let catalog = self.work_orders.fetch_work_orders(&keys).await?;
        if catalog.len() < keys.len() {
            warn!(
                requested = keys.len(),
                found = catalog.len(),
                "部分工单在 ERP 中无 BOM 数据"
            );
        }

        let parts = collect_part_ids(&catalog);
        let inventory = self.inventory.fetch_on_hand(&parts).await?;

        let outcome = self.simulator.simulate(&lines, &catalog, &inventory)?;

        let report = AnalysisReport {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            date: request.date.clone(),
            workshop: filter,
            config_snapshot,
            lines: build_line_reports(lines, outcome.results),
            statistics: outcome.statistics,
            final_inventory: outcome.final_inventory.into_iter().collect(),
        };

        info!(
            run_id = %report.run_id,
            total_lines = report.statistics.total_lines,
            kitted_lines = report.statistics.kitted_lines,
            parts = parts.len(),
            "齐套分析完成"
        );
        Ok(report)
    }

    async fn open_plan(&self, plan_path: &Path, sheet: Option<&str>) -> ApiResult<PlanSheet> {
        let layout = self.config.get_sheet_layout().await?;
        Ok(PlanSheet::open(plan_path, sheet, layout)?)
    }
}

/// BOM 中出现过的全部料号（排序去重）
fn collect_part_ids(catalog: &BomCatalog) -> Vec<String> {
    catalog
        .values()
        .flat_map(|bom| bom.entries.iter().map(|e| e.part_id.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn build_line_reports(
    lines: Vec<PlanLine>,
    mut results: std::collections::HashMap<LineId, LineVerdict>,
) -> Vec<LineReport> {
    lines
        .into_iter()
        .filter_map(|line| {
            let verdict = results.remove(&line.line_id)?;
            Some(LineReport {
                line_id: line.line_id,
                display_text: format_verdict_text(&verdict),
                work_order: line.work_order,
                workshop: line.group,
                requested_qty: line.requested_qty,
                verdict,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bom::{BomEntry, WorkOrderBom};

    #[test]
    fn test_collect_part_ids_dedup() {
        let mut catalog = BomCatalog::new();
        let a = WorkOrderKey::new("5101", "A");
        let b = WorkOrderKey::new("5101", "B");
        catalog.insert(
            a.clone(),
            WorkOrderBom::new(a, 1.0)
                .with_entry(BomEntry::new("P-2", "", 1.0, 0.0))
                .with_entry(BomEntry::new("P-1", "", 1.0, 0.0)),
        );
        catalog.insert(
            b.clone(),
            WorkOrderBom::new(b, 1.0).with_entry(BomEntry::new("P-2", "", 1.0, 0.0)),
        );

        assert_eq!(collect_part_ids(&catalog), vec!["P-1".to_string(), "P-2".to_string()]);
    }
}
