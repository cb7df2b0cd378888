// ==========================================
// 每日排程齐套模拟 - 配置层
// ==========================================
// 职责: 排程表版式配置管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod error;
pub mod sheet_layout;
pub mod sheet_layout_reader;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use sheet_layout::SheetLayout;
pub use sheet_layout_reader::SheetLayoutReader;
