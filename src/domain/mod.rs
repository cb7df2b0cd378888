// ==========================================
// 每日排程齐套模拟 - 领域模型层
// ==========================================
// 职责: 定义计划行、工单 BOM、库存快照、判定结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod bom;
pub mod plan_line;
pub mod types;
pub mod verdict;

// 重导出核心类型
pub use bom::{BomCatalog, BomEntry, InventorySnapshot, WorkOrderBom};
pub use plan_line::PlanLine;
pub use types::{DateLabel, LineId, WorkOrderKey, WorkshopFilter};
pub use verdict::{GroupStats, LineVerdict, RunStatistics, Shortage};
