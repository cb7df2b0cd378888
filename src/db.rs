// ==========================================
// 每日排程齐套模拟 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一建表（配置表 + ERP 快照表），保证 init-db 与测试使用同一套 schema
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表（幂等）
///
/// - config_kv: 全局配置键值
/// - work_order / work_order_bom / part_master / part_stock: ERP 快照
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL DEFAULT 'global',
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS work_order (
            order_type TEXT NOT NULL,
            order_no TEXT NOT NULL,
            planned_qty REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (order_type, order_no)
        );

        CREATE TABLE IF NOT EXISTS work_order_bom (
            order_type TEXT NOT NULL,
            order_no TEXT NOT NULL,
            part_no TEXT NOT NULL,
            required_qty REAL NOT NULL DEFAULT 0,
            issued_qty REAL NOT NULL DEFAULT 0,
            FOREIGN KEY (order_type, order_no)
                REFERENCES work_order(order_type, order_no) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_work_order_bom_order
            ON work_order_bom(order_type, order_no);

        CREATE TABLE IF NOT EXISTS part_master (
            part_no TEXT PRIMARY KEY,
            part_name TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS part_stock (
            part_no TEXT NOT NULL,
            warehouse TEXT NOT NULL,
            on_hand_qty REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (part_no, warehouse)
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// 默认数据库路径
///
/// 优先级: 环境变量 KITTING_SIM_DB_PATH > 用户数据目录 > 当前目录
pub fn default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("KITTING_SIM_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./kitting_sim.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("kitting-sim");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("kitting_sim.db");
        }
    }

    path.to_string_lossy().to_string()
}
