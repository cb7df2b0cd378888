// ==========================================
// 每日排程齐套模拟 - API 层
// ==========================================
// 职责: 提供齐套分析用例,供 CLI 调用
// ==========================================

pub mod error;
pub mod kitting_api;
pub mod result_export;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use kitting_api::{AnalysisReport, AnalysisRequest, KittingApi, LineReport};
pub use result_export::{export_report_json, export_results_csv};
