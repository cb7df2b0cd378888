// ==========================================
// 每日排程齐套模拟 - 需求模型
// ==========================================
// 职责: 由工单 BOM 明细 + 本日计划数推导单行净需求
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::bom::BomEntry;

/// 单个料号在某一计划行上的需求拆解
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartDemand {
    /// 单耗 = 需领 / 工单总量（总量为 0 时为 0）
    pub unit_usage: f64,
    /// 理论配比需求 = 本日计划数 × 单耗
    pub theoretical: f64,
    /// 剩余未领 = max(0, 需领 - 已领)
    pub remaining_issue: f64,
    /// 净需求 = min(剩余未领, 理论配比需求)
    pub net: f64,
}

impl PartDemand {
    /// 净需求 ≤ 0 的料号不计入“需要”
    pub fn is_needed(&self) -> bool {
        self.net > 0.0
    }
}

// ==========================================
// DemandModel - 纯函数工具类
// ==========================================
pub struct DemandModel;

impl DemandModel {
    /// 计算单耗
    ///
    /// # 规则
    /// - work_order_total_qty > 0 → required_qty / work_order_total_qty
    /// - 否则 → 0（不参与单位约束）
    pub fn unit_usage(required_qty: f64, work_order_total_qty: f64) -> f64 {
        if work_order_total_qty > 0.0 {
            required_qty / work_order_total_qty
        } else {
            0.0
        }
    }

    /// 计算净需求
    ///
    /// 净需求同时受“工单剩余未领”和“本日按比例所需”约束，
    /// 单日计划行不会超领工单的未发余量。
    ///
    /// # 参数
    /// - entry: BOM 明细
    /// - work_order_total_qty: 工单预计生产总量
    /// - requested_qty: 本日计划数
    pub fn net_demand(entry: &BomEntry, work_order_total_qty: f64, requested_qty: f64) -> PartDemand {
        let unit_usage = Self::unit_usage(entry.required_qty, work_order_total_qty);
        let theoretical = requested_qty * unit_usage;
        let remaining_issue = entry.remaining_issue();

        PartDemand {
            unit_usage,
            theoretical,
            remaining_issue,
            net: remaining_issue.min(theoretical),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(required: f64, issued: f64) -> BomEntry {
        BomEntry::new("P001", "螺丝", required, issued)
    }

    #[test]
    fn test_unit_usage_zero_total() {
        assert_eq!(DemandModel::unit_usage(100.0, 0.0), 0.0);
        assert_eq!(DemandModel::unit_usage(100.0, 50.0), 2.0);
    }

    #[test]
    fn test_net_demand_proportional() {
        // 工单 100 台，需领 200，已领 0，本日 10 台 → 理论 20
        let d = DemandModel::net_demand(&entry(200.0, 0.0), 100.0, 10.0);
        assert_eq!(d.unit_usage, 2.0);
        assert_eq!(d.theoretical, 20.0);
        assert_eq!(d.remaining_issue, 200.0);
        assert_eq!(d.net, 20.0);
        assert!(d.is_needed());
    }

    #[test]
    fn test_net_demand_capped_by_remaining_issue() {
        // 已领 195，剩余 5 < 理论 20
        let d = DemandModel::net_demand(&entry(200.0, 195.0), 100.0, 10.0);
        assert_eq!(d.net, 5.0);
    }

    #[test]
    fn test_net_demand_fully_issued_not_needed() {
        let d = DemandModel::net_demand(&entry(200.0, 250.0), 100.0, 10.0);
        assert_eq!(d.remaining_issue, 0.0);
        assert!(!d.is_needed());
    }

    #[test]
    fn test_net_demand_zero_total_not_needed() {
        let d = DemandModel::net_demand(&entry(200.0, 0.0), 0.0, 10.0);
        assert_eq!(d.unit_usage, 0.0);
        assert!(!d.is_needed());
    }
}
