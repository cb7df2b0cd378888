// ==========================================
// 每日排程齐套模拟 - 引擎层
// ==========================================
// 职责: 需求推导、库存台账、行评估、顺序分配模拟、统计汇总
// 红线: 引擎不做 I/O，单线程同步执行，结果可复现
// ==========================================

pub mod aggregator;
pub mod demand;
pub mod error;
pub mod evaluator;
pub mod ledger;
pub mod report;
pub mod simulator;

// 重导出核心引擎
pub use aggregator::RunAggregator;
pub use demand::{DemandModel, PartDemand};
pub use error::{EngineError, EngineResult};
pub use evaluator::{LineEvaluation, LineEvaluator};
pub use ledger::{Deductions, InventoryLedger};
pub use report::{format_run_summary, format_verdict_text, DISPLAY_SHORTAGE_LIMIT};
pub use simulator::{AllocationSimulator, SimulationOutcome};
