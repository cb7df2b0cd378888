// ==========================================
// 每日排程齐套模拟 - 计划行领域模型
// ==========================================
// 一次模拟运行内构造一次，之后不可变
// ==========================================

use crate::domain::types::{LineId, WorkOrderKey};
use serde::{Deserialize, Serialize};

/// 当日排程中被选中参与模拟的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanLine {
    pub line_id: LineId,
    pub work_order: WorkOrderKey,
    /// 本日计划数（> 0）
    pub requested_qty: f64,
    /// 车间/分类标签
    pub group: String,
}

impl PlanLine {
    pub fn new(
        line_id: LineId,
        work_order: WorkOrderKey,
        requested_qty: f64,
        group: impl Into<String>,
    ) -> Self {
        Self {
            line_id,
            work_order,
            requested_qty,
            group: group.into(),
        }
    }

    /// 本日计划数向下取整（可产套数上限）
    pub fn requested_sets(&self) -> u64 {
        self.requested_qty.floor() as u64
    }
}
