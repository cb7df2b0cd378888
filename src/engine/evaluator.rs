// ==========================================
// 每日排程齐套模拟 - 计划行评估器
// ==========================================
// 职责: 基于当前台账判定单个计划行是否齐套，并给出待扣减清单
// 红线: 只读评估，不修改台账；扣减由模拟器在齐套后提交
// ==========================================

use crate::domain::bom::WorkOrderBom;
use crate::domain::plan_line::PlanLine;
use crate::domain::verdict::{LineVerdict, Shortage};
use crate::engine::demand::DemandModel;
use crate::engine::ledger::{Deductions, InventoryLedger};

/// 单行评估结果
#[derive(Debug, Clone, PartialEq)]
pub struct LineEvaluation {
    pub verdict: LineVerdict,
    /// 仅在齐套时有意义
    pub deductions: Deductions,
}

// ==========================================
// LineEvaluator - 无状态评估器
// ==========================================
pub struct LineEvaluator;

impl LineEvaluator {
    /// 评估单个计划行
    ///
    /// # 规则
    /// 1. 无 BOM 或 BOM 为空 → 无 ERP 信息，不齐套
    /// 2. 逐条 BOM 计算净需求，净需求 ≤ 0 的跳过
    /// 3. 可用库存 ≥ 净需求 → 该料齐套，否则记缺料
    /// 4. 可产套数 = min(floor(计划数), 短板物料可支撑套数)
    /// 5. 无需领料的行视为齐套，可产套数 = floor(计划数)
    ///
    /// 同一料号在 BOM 中重复出现时，每条都对照台账现有库存判定，
    /// 待扣减量以最后一条为准。
    pub fn evaluate(
        line: &PlanLine,
        bom: Option<&WorkOrderBom>,
        ledger: &InventoryLedger,
    ) -> LineEvaluation {
        let bom = match bom {
            Some(b) if !b.is_empty() => b,
            _ => {
                return LineEvaluation {
                    verdict: LineVerdict::no_erp_data(),
                    deductions: Deductions::default(),
                }
            }
        };

        let mut items_needed = 0usize;
        let mut items_kitted = 0usize;
        let mut shortages = Vec::new();
        let mut deductions = Deductions::default();
        let mut fully_kitted = true;
        // 短板物料可支撑套数（None 表示尚无约束）
        let mut min_possible_sets: Option<u64> = None;

        for entry in &bom.entries {
            let demand = DemandModel::net_demand(entry, bom.total_qty, line.requested_qty);
            if !demand.is_needed() {
                continue;
            }

            items_needed += 1;

            deductions.set(&entry.part_id, demand.net);

            if let Some(sets) = ledger.can_make(&entry.part_id, demand.unit_usage) {
                min_possible_sets = Some(min_possible_sets.map_or(sets, |m| m.min(sets)));
            }

            let available = ledger.query(&entry.part_id);
            if available >= demand.net {
                items_kitted += 1;
            } else {
                fully_kitted = false;
                shortages.push(Shortage {
                    part_id: entry.part_id.clone(),
                    part_name: entry.part_name.clone(),
                    short_qty: demand.net - available,
                });
            }
        }

        let requested_sets = line.requested_sets();
        let possible_sets = if items_needed == 0 {
            requested_sets
        } else {
            min_possible_sets.map_or(requested_sets, |m| m.min(requested_sets))
        };

        let kit_rate = if items_needed > 0 {
            items_kitted as f64 / items_needed as f64
        } else {
            1.0
        };

        LineEvaluation {
            verdict: LineVerdict {
                kit_rate,
                possible_sets,
                shortages,
                fully_kitted,
                items_needed,
                items_kitted,
                erp_data_missing: false,
            },
            deductions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bom::{BomEntry, InventorySnapshot};
    use crate::domain::types::{LineId, WorkOrderKey};

    fn key() -> WorkOrderKey {
        WorkOrderKey::new("5101", "20260125001")
    }

    fn line(qty: f64) -> PlanLine {
        PlanLine::new(LineId(4), key(), qty, "装配一")
    }

    fn ledger(items: &[(&str, f64)]) -> InventoryLedger {
        let snapshot: InventorySnapshot = items.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        InventoryLedger::from_snapshot(&snapshot)
    }

    #[test]
    fn test_missing_bom_is_no_erp_data() {
        let eval = LineEvaluator::evaluate(&line(5.0), None, &ledger(&[]));
        assert!(eval.verdict.erp_data_missing);
        assert!(!eval.verdict.fully_kitted);
        assert!(eval.deductions.is_empty());

        let empty = WorkOrderBom::new(key(), 100.0);
        let eval = LineEvaluator::evaluate(&line(5.0), Some(&empty), &ledger(&[]));
        assert!(eval.verdict.erp_data_missing);
    }

    #[test]
    fn test_fully_kitted_line() {
        let bom = WorkOrderBom::new(key(), 100.0)
            .with_entry(BomEntry::new("P001", "机壳", 100.0, 0.0))
            .with_entry(BomEntry::new("P002", "螺丝", 400.0, 0.0));
        let l = ledger(&[("P001", 50.0), ("P002", 100.0)]);

        let eval = LineEvaluator::evaluate(&line(10.0), Some(&bom), &l);
        let v = &eval.verdict;
        assert!(v.fully_kitted);
        assert_eq!(v.items_needed, 2);
        assert_eq!(v.items_kitted, 2);
        assert_eq!(v.kit_rate, 1.0);
        // P001 可支撑 50 套，P002 可支撑 25 套，计划 10 套
        assert_eq!(v.possible_sets, 10);
        assert_eq!(eval.deductions.get("P001"), 10.0);
        assert_eq!(eval.deductions.get("P002"), 40.0);
    }

    #[test]
    fn test_partial_shortage() {
        let bom = WorkOrderBom::new(key(), 100.0)
            .with_entry(BomEntry::new("P001", "机壳", 100.0, 0.0))
            .with_entry(BomEntry::new("P002", "螺丝", 400.0, 0.0));
        let l = ledger(&[("P001", 50.0), ("P002", 12.0)]);

        let eval = LineEvaluator::evaluate(&line(10.0), Some(&bom), &l);
        let v = &eval.verdict;
        assert!(!v.fully_kitted);
        assert_eq!(v.kit_rate, 0.5);
        assert_eq!(v.possible_sets, 3);
        assert_eq!(v.shortages.len(), 1);
        assert_eq!(v.shortages[0].part_name, "螺丝");
        assert!((v.shortages[0].short_qty - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_requested_qty_floors_sets() {
        let bom = WorkOrderBom::new(key(), 10.0).with_entry(BomEntry::new("P001", "机壳", 10.0, 0.0));
        let eval = LineEvaluator::evaluate(&line(2.7), Some(&bom), &ledger(&[("P001", 100.0)]));
        assert!(eval.verdict.fully_kitted);
        assert_eq!(eval.verdict.possible_sets, 2);
        assert!((eval.deductions.get("P001") - 2.7).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_part_rows_checked_against_stock_last_row_deducts() {
        // 同一料号两行，各需 6，库存 10：每行单独对照库存，扣减取最后一行
        let bom = WorkOrderBom::new(key(), 10.0)
            .with_entry(BomEntry::new("P001", "机壳", 10.0, 0.0))
            .with_entry(BomEntry::new("P001", "机壳", 10.0, 0.0));
        let eval = LineEvaluator::evaluate(&line(6.0), Some(&bom), &ledger(&[("P001", 10.0)]));
        let v = &eval.verdict;
        assert_eq!(v.items_needed, 2);
        assert_eq!(v.items_kitted, 2);
        assert!(v.fully_kitted);
        assert!(v.shortages.is_empty());
        assert_eq!(eval.deductions.get("P001"), 6.0);

        // 两行需求不同时，以后一行的净需求为准
        let bom = WorkOrderBom::new(key(), 10.0)
            .with_entry(BomEntry::new("P001", "机壳", 10.0, 0.0))
            .with_entry(BomEntry::new("P001", "机壳", 5.0, 0.0));
        let eval = LineEvaluator::evaluate(&line(6.0), Some(&bom), &ledger(&[("P001", 10.0)]));
        assert!(eval.verdict.fully_kitted);
        assert_eq!(eval.deductions.get("P001"), 3.0);
    }

    #[test]
    fn test_evaluate_is_read_only_and_repeatable() {
        let bom = WorkOrderBom::new(key(), 10.0).with_entry(BomEntry::new("P001", "机壳", 10.0, 0.0));
        let l = ledger(&[("P001", 10.0)]);
        let before = l.clone();

        let a = LineEvaluator::evaluate(&line(6.0), Some(&bom), &l);
        let b = LineEvaluator::evaluate(&line(6.0), Some(&bom), &l);
        assert_eq!(a, b);
        assert_eq!(l, before);
    }
}
