// ==========================================
// 每日排程齐套模拟 - 库存数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化；IN 列表分批，避免超过 SQLite 变量上限
// ==========================================

use crate::domain::bom::InventorySnapshot;
use crate::repository::erp_provider::InventoryProvider;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, params_from_iter, Connection};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// 单次 IN 查询的料号数上限
pub const PART_QUERY_CHUNK_SIZE: usize = 500;

/// 库存仓储
/// 职责: 读取 part_stock，按料号跨仓汇总
pub struct InventoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl InventoryRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询料号现有库存（跨仓汇总）
    pub fn find_on_hand(&self, part_ids: &[String]) -> RepositoryResult<InventorySnapshot> {
        let unique: Vec<&String> = part_ids.iter().collect::<BTreeSet<_>>().into_iter().collect();
        let mut snapshot = InventorySnapshot::with_capacity(unique.len());
        if unique.is_empty() {
            return Ok(snapshot);
        }

        let conn = self.get_conn()?;
        for chunk in unique.chunks(PART_QUERY_CHUNK_SIZE) {
            let placeholders = vec!["?"; chunk.len()].join(",");
            let sql = format!(
                r#"
                SELECT RTRIM(part_no), SUM(on_hand_qty)
                FROM part_stock
                WHERE RTRIM(part_no) IN ({})
                GROUP BY RTRIM(part_no)
                "#,
                placeholders
            );

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?;
            for row in rows {
                let (part, qty) = row?;
                snapshot.insert(part, qty);
            }
        }

        debug!(requested = unique.len(), found = snapshot.len(), "库存查询完成");
        Ok(snapshot)
    }

    /// 新增或更新某仓库的料号库存
    pub fn upsert_stock(&self, part_no: &str, warehouse: &str, on_hand_qty: f64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO part_stock (part_no, warehouse, on_hand_qty) VALUES (?1, ?2, ?3)
            ON CONFLICT(part_no, warehouse) DO UPDATE SET on_hand_qty = excluded.on_hand_qty
            "#,
            params![part_no, warehouse, on_hand_qty],
        )?;
        Ok(())
    }
}

#[async_trait]
impl InventoryProvider for InventoryRepository {
    async fn fetch_on_hand(&self, part_ids: &[String]) -> RepositoryResult<InventorySnapshot> {
        self.find_on_hand(part_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;

    fn repo() -> InventoryRepository {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        InventoryRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_sum_across_warehouses() {
        let repo = repo();
        repo.upsert_stock("P-1", "W1", 30.0).unwrap();
        repo.upsert_stock("P-1", "W2", 12.5).unwrap();
        repo.upsert_stock("P-2", "W1", 7.0).unwrap();

        let snapshot = repo
            .find_on_hand(&["P-1".to_string(), "P-3".to_string()])
            .unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["P-1"], 42.5);
    }

    #[test]
    fn test_upsert_overwrites_warehouse_qty() {
        let repo = repo();
        repo.upsert_stock("P-1", "W1", 30.0).unwrap();
        repo.upsert_stock("P-1", "W1", 3.0).unwrap();
        assert_eq!(repo.find_on_hand(&["P-1".to_string()]).unwrap()["P-1"], 3.0);
    }

    #[test]
    fn test_empty_request() {
        let repo = repo();
        assert!(repo.find_on_hand(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_chunked_query() {
        let repo = repo();
        let parts: Vec<String> = (0..(PART_QUERY_CHUNK_SIZE + 20))
            .map(|i| format!("P-{:04}", i))
            .collect();
        for part in &parts {
            repo.upsert_stock(part, "W1", 1.0).unwrap();
        }

        let snapshot = repo.find_on_hand(&parts).unwrap();
        assert_eq!(snapshot.len(), parts.len());
    }
}
