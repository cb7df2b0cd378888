// ==========================================
// 每日排程齐套模拟 - ERP 数据提供者 Trait
// ==========================================
// 职责: 引擎运行前一次性获取 BOM 与库存快照
// 实现者: WorkOrderRepository / InventoryRepository（SQLite ERP 快照）
// ==========================================

use crate::domain::bom::{BomCatalog, InventorySnapshot};
use crate::domain::types::WorkOrderKey;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

/// 工单 BOM 提供者
#[async_trait]
pub trait WorkOrderProvider: Send + Sync {
    /// 批量获取工单 BOM 与工单总量
    ///
    /// # 返回
    /// - 找不到的工单（或没有 BOM 明细的工单）不出现在结果中
    async fn fetch_work_orders(&self, keys: &[WorkOrderKey]) -> RepositoryResult<BomCatalog>;
}

/// 现有库存提供者
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// 批量获取料号现有库存（跨仓汇总）
    ///
    /// # 返回
    /// - 无库存记录的料号不出现在结果中（引擎按 0 处理）
    async fn fetch_on_hand(&self, part_ids: &[String]) -> RepositoryResult<InventorySnapshot>;
}
