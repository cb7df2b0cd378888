// ==========================================
// 每日排程齐套模拟 - 引擎错误类型
// ==========================================
// 只表示调用方违反输入契约的情况；
// 缺 BOM、工单总量为 0、未知料号都是正常判定结果，不走错误
// ==========================================

use crate::domain::types::{LineId, WorkOrderKey};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("计划数非法 (行 {line_id}): {value}，必须为大于 0 的有限数值")]
    InvalidRequestedQty { line_id: LineId, value: f64 },

    #[error("计划行标识重复: 行 {0}")]
    DuplicateLineId(LineId),

    #[error("工单总量非法 (工单 {work_order}): {value}")]
    InvalidWorkOrderTotal { work_order: WorkOrderKey, value: f64 },

    #[error("BOM 数量非法 (工单 {work_order}, 料号 {part_id}, 字段 {field}): {value}")]
    InvalidBomQuantity {
        work_order: WorkOrderKey,
        part_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("库存数量非法 (料号 {part_id}): {value}")]
    InvalidStock { part_id: String, value: f64 },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
