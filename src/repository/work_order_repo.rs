// ==========================================
// 每日排程齐套模拟 - 工单 BOM 数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化
// ==========================================

use crate::domain::bom::{BomCatalog, BomEntry, WorkOrderBom};
use crate::domain::types::WorkOrderKey;
use crate::repository::erp_provider::WorkOrderProvider;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// ==========================================
// WorkOrderRepository - 工单仓储
// ==========================================

/// 工单仓储
/// 职责: 读取 work_order / work_order_bom / part_master
pub struct WorkOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WorkOrderRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按工单键批量查询 BOM
    ///
    /// # 规则
    /// - 工单与 BOM 内连接：无 BOM 明细的工单不返回
    /// - 品名取 part_master，缺失为空串
    /// - 标识字段去除尾部空格（ERP 定长字段）
    pub fn find_by_keys(&self, keys: &[WorkOrderKey]) -> RepositoryResult<BomCatalog> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                w.planned_qty,
                RTRIM(b.part_no),
                COALESCE(RTRIM(m.part_name), ''),
                b.required_qty,
                b.issued_qty
            FROM work_order w
            INNER JOIN work_order_bom b
                ON w.order_type = b.order_type AND w.order_no = b.order_no
            LEFT JOIN part_master m ON b.part_no = m.part_no
            WHERE RTRIM(w.order_type) = ?1 AND RTRIM(w.order_no) = ?2
            ORDER BY b.rowid
            "#,
        )?;

        let unique: BTreeSet<&WorkOrderKey> = keys.iter().collect();
        let mut catalog = BomCatalog::with_capacity(unique.len());

        for key in unique {
            let rows = stmt.query_map(params![key.order_type, key.order_no], |row| {
                Ok((
                    row.get::<_, f64>(0)?,
                    BomEntry {
                        part_id: row.get(1)?,
                        part_name: row.get(2)?,
                        required_qty: row.get(3)?,
                        issued_qty: row.get(4)?,
                    },
                ))
            })?;

            let mut bom: Option<WorkOrderBom> = None;
            for row in rows {
                let (total_qty, entry) = row?;
                bom.get_or_insert_with(|| WorkOrderBom::new(key.clone(), total_qty))
                    .entries
                    .push(entry);
            }

            match bom {
                Some(bom) => {
                    catalog.insert(key.clone(), bom);
                }
                None => debug!(work_order = %key, "ERP 中无该工单 BOM"),
            }
        }

        Ok(catalog)
    }

    /// 新增或更新工单
    pub fn upsert_work_order(&self, key: &WorkOrderKey, planned_qty: f64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO work_order (order_type, order_no, planned_qty)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(order_type, order_no) DO UPDATE SET planned_qty = excluded.planned_qty
            "#,
            params![key.order_type, key.order_no, planned_qty],
        )?;
        Ok(())
    }

    /// 新增 BOM 明细
    pub fn insert_bom_line(
        &self,
        key: &WorkOrderKey,
        part_no: &str,
        required_qty: f64,
        issued_qty: f64,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO work_order_bom (order_type, order_no, part_no, required_qty, issued_qty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![key.order_type, key.order_no, part_no, required_qty, issued_qty],
        )?;
        Ok(())
    }

    /// 新增或更新料号品名
    pub fn upsert_part(&self, part_no: &str, part_name: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO part_master (part_no, part_name) VALUES (?1, ?2)
            ON CONFLICT(part_no) DO UPDATE SET part_name = excluded.part_name
            "#,
            params![part_no, part_name],
        )?;
        Ok(())
    }
}

#[async_trait]
impl WorkOrderProvider for WorkOrderRepository {
    async fn fetch_work_orders(&self, keys: &[WorkOrderKey]) -> RepositoryResult<BomCatalog> {
        self.find_by_keys(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, ensure_schema};

    fn repo() -> WorkOrderRepository {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        WorkOrderRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_find_by_keys_joins_bom_and_names() {
        let repo = repo();
        let key = WorkOrderKey::new("5101", "WO-001");
        repo.upsert_work_order(&key, 100.0).unwrap();
        repo.insert_bom_line(&key, "P-1", 200.0, 40.0).unwrap();
        repo.insert_bom_line(&key, "P-2", 100.0, 0.0).unwrap();
        repo.upsert_part("P-1", "螺丝").unwrap();

        let catalog = repo.find_by_keys(&[key.clone()]).unwrap();
        let bom = catalog.get(&key).unwrap();
        assert_eq!(bom.total_qty, 100.0);
        assert_eq!(bom.entries.len(), 2);
        assert_eq!(bom.entries[0].part_id, "P-1");
        assert_eq!(bom.entries[0].part_name, "螺丝");
        assert_eq!(bom.entries[0].issued_qty, 40.0);
        assert_eq!(bom.entries[1].part_name, "");
    }

    #[test]
    fn test_missing_or_empty_work_orders_are_skipped() {
        let repo = repo();
        let empty = WorkOrderKey::new("5101", "WO-EMPTY");
        repo.upsert_work_order(&empty, 10.0).unwrap();

        let catalog = repo
            .find_by_keys(&[empty, WorkOrderKey::new("5101", "WO-NONE")])
            .unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_trailing_spaces_in_erp_keys() {
        let repo = repo();
        let padded = WorkOrderKey::new("5101  ", "WO-002   ");
        repo.upsert_work_order(&padded, 5.0).unwrap();
        repo.insert_bom_line(&padded, "P-9   ", 5.0, 0.0).unwrap();

        let key = WorkOrderKey::new("5101", "WO-002");
        let catalog = repo.find_by_keys(&[key.clone(), key.clone()]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[&key].entries[0].part_id, "P-9");
    }

    #[tokio::test]
    async fn test_provider_trait() {
        let repo = repo();
        let key = WorkOrderKey::new("5101", "WO-003");
        repo.upsert_work_order(&key, 1.0).unwrap();
        repo.insert_bom_line(&key, "P-1", 1.0, 0.0).unwrap();

        let provider: &dyn WorkOrderProvider = &repo;
        let catalog = provider.fetch_work_orders(&[key.clone()]).await.unwrap();
        assert!(catalog.contains_key(&key));
    }
}
