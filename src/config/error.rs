// ==========================================
// 每日排程齐套模拟 - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },

    #[error("未知配置键: {key}（可用: {known}）")]
    UnknownKey { key: String, known: String },

    #[error("版式配置无效: {0}")]
    InvalidLayout(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("配置读取失败: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("配置快照序列化失败: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
