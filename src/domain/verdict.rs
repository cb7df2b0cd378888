// ==========================================
// 每日排程齐套模拟 - 齐套判定结果与运行统计
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Shortage - 缺料明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortage {
    pub part_id: String,
    pub part_name: String,
    /// 缺口数量 = 净需求 - 当前可用库存
    pub short_qty: f64,
}

impl Shortage {
    /// 展示名：品名为空时退回料号
    pub fn display_name(&self) -> &str {
        if self.part_name.trim().is_empty() {
            &self.part_id
        } else {
            &self.part_name
        }
    }
}

// ==========================================
// LineVerdict - 单行齐套判定
// ==========================================
// 不可变值对象；完整缺料列表保留在此，截断只在展示层做
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineVerdict {
    /// 齐套率，范围 [0, 1]
    pub kit_rate: f64,
    /// 可产套数（≤ floor(本日计划数)，并受短板物料约束）
    pub possible_sets: u64,
    /// 按 BOM 顺序排列的缺料
    pub shortages: Vec<Shortage>,
    pub fully_kitted: bool,
    pub items_needed: usize,
    pub items_kitted: usize,
    /// ERP 中找不到该工单（或工单无 BOM 明细）
    pub erp_data_missing: bool,
}

impl LineVerdict {
    /// 工单无 ERP 数据时的判定：不齐套、不占用库存
    pub fn no_erp_data() -> Self {
        Self {
            kit_rate: 0.0,
            possible_sets: 0,
            shortages: Vec::new(),
            fully_kitted: false,
            items_needed: 0,
            items_kitted: 0,
            erp_data_missing: true,
        }
    }

    /// 是否需要标红（缺料或无数据）
    pub fn is_short(&self) -> bool {
        !self.fully_kitted
    }
}

// ==========================================
// GroupStats / RunStatistics - 运行统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    pub total: usize,
    pub kitted: usize,
}

impl GroupStats {
    /// kitted / total，total 为 0 时返回 0
    pub fn kit_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.kitted as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub total_lines: usize,
    pub kitted_lines: usize,
    /// 车间 → 统计（按车间名排序，保证输出稳定）
    pub groups: BTreeMap<String, GroupStats>,
}

impl RunStatistics {
    pub fn kit_ratio(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            self.kitted_lines as f64 / self.total_lines as f64
        }
    }

    pub fn group(&self, name: &str) -> Option<&GroupStats> {
        self.groups.get(name)
    }
}
