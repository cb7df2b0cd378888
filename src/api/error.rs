// ==========================================
// 每日排程齐套模拟 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，向 CLI / 调用方给出带原因的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::domain::types::{DateLabel, WorkshopFilter};
use crate::engine::EngineError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    /// 所选日期与车间下没有任何排产数大于 0 的计划行
    #[error("无排产计划: date={date}, workshop={workshop}")]
    NoPlanLines {
        date: DateLabel,
        workshop: WorkshopFilter,
    },

    // ==========================================
    // 分层错误
    // ==========================================
    #[error("计划表读取失败: {0}")]
    Import(#[from] ImportError),

    #[error("齐套模拟输入非法: {0}")]
    Engine(#[from] EngineError),

    #[error("配置读取失败: {0}")]
    Config(#[from] ConfigError),

    #[error("ERP 数据查询失败: {0}")]
    Repository(#[from] RepositoryError),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("结果导出失败: {0}")]
    ExportError(String),
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::LineId;

    #[test]
    fn test_error_messages_carry_reason() {
        let err = ApiError::NoPlanLines {
            date: "2026-01-25".parse().unwrap(),
            workshop: WorkshopFilter::Only("一车间".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("2026-01-25"));
        assert!(msg.contains("一车间"));

        let err: ApiError = EngineError::DuplicateLineId(LineId(7)).into();
        assert!(matches!(err, ApiError::Engine(_)));
    }
}
