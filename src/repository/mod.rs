// ==========================================
// 每日排程齐套模拟 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供 ERP 快照（工单 BOM、库存）的数据访问
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod erp_provider;
pub mod error;
pub mod inventory_repo;
pub mod work_order_repo;

// 重导出核心仓储
pub use erp_provider::{InventoryProvider, WorkOrderProvider};
pub use error::{RepositoryError, RepositoryResult};
pub use inventory_repo::InventoryRepository;
pub use work_order_repo::WorkOrderRepository;
