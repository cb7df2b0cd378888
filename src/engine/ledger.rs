// ==========================================
// 每日排程齐套模拟 - 库存台账
// ==========================================
// 职责: 单次模拟运行内的共享可扣减库存
// 红线: 库存只减不增，只接受齐套行的整批扣减
// ==========================================

use crate::domain::bom::InventorySnapshot;
use serde::Serialize;
use std::collections::BTreeMap;

// ==========================================
// Deductions - 单行待扣减清单
// ==========================================
// 只能由行评估器构造，保证提交给台账的扣减都来自一次完整评估
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Deductions(BTreeMap<String, f64>);

impl Deductions {
    /// 同一料号多次出现时后写覆盖
    pub(crate) fn set(&mut self, part_id: &str, qty: f64) {
        self.0.insert(part_id.to_string(), qty);
    }

    /// 本行待扣减数量（未出现为 0）
    pub fn get(&self, part_id: &str) -> f64 {
        self.0.get(part_id).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ==========================================
// InventoryLedger - 库存台账
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryLedger {
    on_hand: BTreeMap<String, f64>,
}

impl InventoryLedger {
    /// 从库存快照构造（复制，调用方快照不受影响）
    pub fn from_snapshot(snapshot: &InventorySnapshot) -> Self {
        Self {
            on_hand: snapshot.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        }
    }

    /// 查询现有库存，未知料号视为 0
    pub fn query(&self, part_id: &str) -> f64 {
        self.on_hand.get(part_id).copied().unwrap_or(0.0)
    }

    /// 现有库存可支撑的成品套数
    ///
    /// # 返回
    /// - Some(n): floor(库存 / 单耗)，库存 ≤ 0 时为 0
    /// - None: 单耗为 0，该料号不构成套数约束
    pub fn can_make(&self, part_id: &str, unit_usage: f64) -> Option<u64> {
        if unit_usage <= 0.0 {
            return None;
        }
        let sets = (self.query(part_id) / unit_usage).floor();
        if sets <= 0.0 {
            Some(0)
        } else {
            Some(sets as u64)
        }
    }

    /// 提交一整行的扣减
    ///
    /// 只应在该行判定为齐套后调用；评估阶段已保证每项扣减不超过可用库存。
    pub fn commit(&mut self, deductions: &Deductions) {
        for (part_id, qty) in deductions.iter() {
            debug_assert!(qty >= 0.0, "扣减量不能为负: {} {}", part_id, qty);
            *self.on_hand.entry(part_id.to_string()).or_insert(0.0) -= qty;
        }
    }

    /// 导出当前台账
    pub fn snapshot(&self) -> InventorySnapshot {
        self.on_hand.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }
}
