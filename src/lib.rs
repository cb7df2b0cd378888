// ==========================================
// 每日排程齐套模拟 - 核心库
// ==========================================
// 职责: 给定当日排程、工单 BOM 与现有库存，
//       按排程顺序逐行模拟领料，判定每行是否齐套
// 系统定位: 决策支持（只读 ERP 快照，不回写 ERP）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - ERP 快照访问
pub mod repository;

// 引擎层 - 齐套模拟
pub mod engine;

// 导入层 - 计划表
pub mod importer;

// 配置层 - 表格布局配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 齐套分析用例
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DateLabel, LineId, WorkOrderKey, WorkshopFilter};

// 领域实体
pub use domain::{
    BomCatalog, BomEntry, GroupStats, InventorySnapshot, LineVerdict, PlanLine, RunStatistics,
    Shortage, WorkOrderBom,
};

// 引擎
pub use engine::{AllocationSimulator, EngineError, InventoryLedger, SimulationOutcome};

// API
pub use api::{AnalysisReport, AnalysisRequest, KittingApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "每日排程齐套模拟";
