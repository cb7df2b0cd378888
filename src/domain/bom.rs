// ==========================================
// 每日排程齐套模拟 - 工单 BOM 与库存快照
// ==========================================
// 每次运行加载一次的只读快照，运行期间不修改
// ==========================================

use crate::domain::types::WorkOrderKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// BomEntry - 工单用料明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomEntry {
    pub part_id: String,
    pub part_name: String,
    /// 整张工单累计需领用量
    pub required_qty: f64,
    /// 整张工单累计已领用量
    pub issued_qty: f64,
}

impl BomEntry {
    pub fn new(
        part_id: impl Into<String>,
        part_name: impl Into<String>,
        required_qty: f64,
        issued_qty: f64,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            part_name: part_name.into(),
            required_qty,
            issued_qty,
        }
    }

    /// 剩余未领 = max(0, 需领 - 已领)
    pub fn remaining_issue(&self) -> f64 {
        (self.required_qty - self.issued_qty).max(0.0)
    }
}

// ==========================================
// WorkOrderBom - 单张工单的 BOM
// ==========================================
// 红线: 同一工单的所有明细共用一个 total_qty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderBom {
    pub key: WorkOrderKey,
    /// 工单预计生产总量（0 表示未知）
    pub total_qty: f64,
    pub entries: Vec<BomEntry>,
}

impl WorkOrderBom {
    pub fn new(key: WorkOrderKey, total_qty: f64) -> Self {
        Self {
            key,
            total_qty,
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: BomEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 工单键 → BOM
pub type BomCatalog = HashMap<WorkOrderKey, WorkOrderBom>;

/// 料号 → 现有库存
pub type InventorySnapshot = HashMap<String, f64>;
