// ==========================================
// 每日排程齐套模拟 - 版式配置读取 Trait
// ==========================================
// 职责: 定义计划来源层所需的配置读取接口（不包含实现）
// 实现者: ConfigManager（从 config_kv 表读取）
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::sheet_layout::SheetLayout;
use async_trait::async_trait;

#[async_trait]
pub trait SheetLayoutReader: Send + Sync {
    /// 获取排程表版式
    ///
    /// # 返回
    /// - 缺省键使用 SheetLayout::default() 中的值
    /// - 值格式错误或版式自检失败时返回错误
    async fn get_sheet_layout(&self) -> ConfigResult<SheetLayout>;

    /// 获取全部配置快照（JSON），用于分析报告留痕
    async fn get_config_snapshot_json(&self) -> ConfigResult<String>;
}
