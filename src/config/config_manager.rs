// ==========================================
// 每日排程齐套模拟 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::sheet_layout::SheetLayout;
use crate::config::sheet_layout_reader::SheetLayoutReader;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const HEADER_ROW: &str = "sheet.header_row";
    pub const DATE_ROW: &str = "sheet.date_row";
    pub const DATA_START_ROW: &str = "sheet.data_start_row";
    pub const WORKSHOP_COLUMN: &str = "sheet.col.workshop";
    pub const ORDER_TYPE_COLUMN: &str = "sheet.col.order_type";
    pub const ORDER_NO_COLUMN: &str = "sheet.col.order_no";
    pub const ALL_WORKSHOPS_LABEL: &str = "label.all_workshops";
    pub const UNCLASSIFIED_LABEL: &str = "label.unclassified";

    /// 全部可写的配置键
    pub const ALL: [&str; 8] = [
        HEADER_ROW,
        DATE_ROW,
        DATA_START_ROW,
        WORKSHOP_COLUMN,
        ORDER_TYPE_COLUMN,
        ORDER_NO_COLUMN,
        ALL_WORKSHOPS_LABEL,
        UNCLASSIFIED_LABEL,
    ];

    pub fn is_known(key: &str) -> bool {
        ALL.contains(&key)
    }
}

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn.lock().map_err(|e| ConfigError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入/覆盖配置值
    ///
    /// 只接受 config_keys 中列出的键，未知键直接报错，不落库
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        if !config_keys::is_known(key) {
            return Err(ConfigError::UnknownKey {
                key: key.to_string(),
                known: config_keys::ALL.join(", "),
            });
        }

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON 对象，键有序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    fn get_text_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        match self.get_config_value(key)? {
            Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
            _ => Ok(default.to_string()),
        }
    }

    fn get_row_or_default(&self, key: &str, default: u32) -> ConfigResult<u32> {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };
        match raw.trim().parse::<u32>() {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(ConfigError::ValueError {
                key: key.to_string(),
                value: raw,
                message: "期望正整数行号".to_string(),
            }),
        }
    }

    /// 加载排程表版式（缺省键取默认值）
    pub fn load_sheet_layout(&self) -> ConfigResult<SheetLayout> {
        let d = SheetLayout::default();
        let layout = SheetLayout {
            header_row: self.get_row_or_default(config_keys::HEADER_ROW, d.header_row)?,
            date_row: self.get_row_or_default(config_keys::DATE_ROW, d.date_row)?,
            data_start_row: self.get_row_or_default(config_keys::DATA_START_ROW, d.data_start_row)?,
            workshop_column: self.get_text_or_default(config_keys::WORKSHOP_COLUMN, &d.workshop_column)?,
            order_type_column: self
                .get_text_or_default(config_keys::ORDER_TYPE_COLUMN, &d.order_type_column)?,
            order_no_column: self.get_text_or_default(config_keys::ORDER_NO_COLUMN, &d.order_no_column)?,
            all_workshops_label: self
                .get_text_or_default(config_keys::ALL_WORKSHOPS_LABEL, &d.all_workshops_label)?,
            unclassified_label: self
                .get_text_or_default(config_keys::UNCLASSIFIED_LABEL, &d.unclassified_label)?,
        };

        layout.validate().map_err(ConfigError::InvalidLayout)?;
        Ok(layout)
    }
}

#[async_trait]
impl SheetLayoutReader for ConfigManager {
    async fn get_sheet_layout(&self) -> ConfigResult<SheetLayout> {
        self.load_sheet_layout()
    }

    async fn get_config_snapshot_json(&self) -> ConfigResult<String> {
        self.get_config_snapshot()
    }
}
