// ==========================================
// 每日排程齐套模拟 - 导入层（计划来源）
// ==========================================
// 职责: 读取每日排程表，识别表头/日期列，抽取计划行
// 支持: Excel, CSV
// ==========================================

pub mod date_header;
pub mod error;
pub mod file_parser;
pub mod grid;
pub mod plan_sheet;

// 重导出核心类型
pub use date_header::{excel_serial_to_date, parse_date_header};
pub use error::{ImportError, ImportResult};
pub use file_parser::GridReader;
pub use grid::{CellValue, SheetGrid};
pub use plan_sheet::PlanSheet;
