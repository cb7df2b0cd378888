// ==========================================
// 每日排程齐套模拟 - 统计汇总器
// ==========================================

use crate::domain::verdict::{LineVerdict, RunStatistics};

/// 按判定逐条累计总数/齐套数，及各车间明细
#[derive(Debug, Default)]
pub struct RunAggregator {
    stats: RunStatistics,
}

impl RunAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, group: &str, verdict: &LineVerdict) {
        self.stats.total_lines += 1;
        let group_stats = self.stats.groups.entry(group.to_string()).or_default();
        group_stats.total += 1;

        if verdict.fully_kitted {
            self.stats.kitted_lines += 1;
            group_stats.kitted += 1;
        }
    }

    pub fn finish(self) -> RunStatistics {
        self.stats
    }
}
