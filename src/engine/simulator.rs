// ==========================================
// 每日排程齐套模拟 - 齐套分配模拟器
// ==========================================
// 职责: 按输入顺序逐行评估，齐套则整批扣减台账 (All-or-Nothing)
// 红线: 顺序即契约；缺一件也不扣减；调用方快照不被修改
// ==========================================

use crate::domain::bom::{BomCatalog, InventorySnapshot};
use crate::domain::plan_line::PlanLine;
use crate::domain::types::LineId;
use crate::domain::verdict::{LineVerdict, RunStatistics};
use crate::engine::aggregator::RunAggregator;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::evaluator::{LineEvaluation, LineEvaluator};
use crate::engine::ledger::InventoryLedger;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

// ==========================================
// SimulationOutcome - 模拟结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    /// 行标识 → 判定
    pub results: HashMap<LineId, LineVerdict>,
    /// 处理顺序（即输入顺序）
    pub order: Vec<LineId>,
    pub statistics: RunStatistics,
    /// 全部行处理完后的台账
    pub final_inventory: InventorySnapshot,
}

impl SimulationOutcome {
    pub fn verdict(&self, line_id: LineId) -> Option<&LineVerdict> {
        self.results.get(&line_id)
    }

    /// 按处理顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (LineId, &LineVerdict)> {
        self.order
            .iter()
            .filter_map(move |id| self.results.get(id).map(|v| (*id, v)))
    }
}

// ==========================================
// AllocationSimulator - 无状态模拟器
// ==========================================
#[derive(Debug, Default)]
pub struct AllocationSimulator;

impl AllocationSimulator {
    pub fn new() -> Self {
        Self
    }

    /// 执行一次完整模拟
    ///
    /// # 参数
    /// - lines: 计划行（顺序决定谁先抢到稀缺物料）
    /// - catalog: 工单 BOM 快照
    /// - inventory: 起始库存快照（复制后使用）
    ///
    /// # 返回
    /// - Ok(SimulationOutcome)
    /// - Err(EngineError): 输入违反契约，此时不产生任何部分结果
    #[instrument(skip_all, fields(line_count = lines.len(), work_orders = catalog.len()))]
    pub fn simulate(
        &self,
        lines: &[PlanLine],
        catalog: &BomCatalog,
        inventory: &InventorySnapshot,
    ) -> EngineResult<SimulationOutcome> {
        validate_inputs(lines, catalog, inventory)?;

        let mut ledger = InventoryLedger::from_snapshot(inventory);
        let mut aggregator = RunAggregator::new();
        let mut results = HashMap::with_capacity(lines.len());
        let mut order = Vec::with_capacity(lines.len());

        for line in lines {
            let evaluation = self.step(&mut ledger, line, catalog);
            let verdict = evaluation.verdict;

            debug!(
                line_id = %line.line_id,
                work_order = %line.work_order,
                requested_qty = line.requested_qty,
                fully_kitted = verdict.fully_kitted,
                kit_rate = verdict.kit_rate,
                possible_sets = verdict.possible_sets,
                shortages = verdict.shortages.len(),
                "计划行评估完成"
            );

            aggregator.record(&line.group, &verdict);
            order.push(line.line_id);
            results.insert(line.line_id, verdict);
        }

        let statistics = aggregator.finish();
        info!(
            total_lines = statistics.total_lines,
            kitted_lines = statistics.kitted_lines,
            "齐套模拟完成"
        );

        Ok(SimulationOutcome {
            results,
            order,
            statistics,
            final_inventory: ledger.snapshot(),
        })
    }

    /// 处理单行：评估，齐套则提交扣减
    ///
    /// 对外公开以便逐行观察台账变化；不做输入校验。
    pub fn step(
        &self,
        ledger: &mut InventoryLedger,
        line: &PlanLine,
        catalog: &BomCatalog,
    ) -> LineEvaluation {
        let evaluation = LineEvaluator::evaluate(line, catalog.get(&line.work_order), ledger);
        if evaluation.verdict.fully_kitted {
            ledger.commit(&evaluation.deductions);
        }
        evaluation
    }
}

/// 运行前整体校验，保证模拟过程本身无失败路径
fn validate_inputs(
    lines: &[PlanLine],
    catalog: &BomCatalog,
    inventory: &InventorySnapshot,
) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        if !line.requested_qty.is_finite() || line.requested_qty <= 0.0 {
            return Err(EngineError::InvalidRequestedQty {
                line_id: line.line_id,
                value: line.requested_qty,
            });
        }
        if !seen.insert(line.line_id) {
            return Err(EngineError::DuplicateLineId(line.line_id));
        }

        let Some(bom) = catalog.get(&line.work_order) else {
            continue;
        };
        if !bom.total_qty.is_finite() || bom.total_qty < 0.0 {
            return Err(EngineError::InvalidWorkOrderTotal {
                work_order: bom.key.clone(),
                value: bom.total_qty,
            });
        }
        for entry in &bom.entries {
            for (field, value) in [("required_qty", entry.required_qty), ("issued_qty", entry.issued_qty)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(EngineError::InvalidBomQuantity {
                        work_order: bom.key.clone(),
                        part_id: entry.part_id.clone(),
                        field,
                        value,
                    });
                }
            }
        }
    }

    // 库存允许为负（ERP 账面可能透支），但必须是有限数值
    if let Some((part_id, value)) = inventory.iter().find(|(_, v)| !v.is_finite()) {
        return Err(EngineError::InvalidStock {
            part_id: part_id.clone(),
            value: *value,
        });
    }

    Ok(())
}
