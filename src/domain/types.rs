// ==========================================
// 每日排程齐套模拟 - 领域类型定义
// ==========================================
// 职责: 计划行标识、工单键、车间筛选、日期列标签
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 计划行标识 (Line Id)
// ==========================================
// 指回数据源的行号（1-based），引擎内视为不透明句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub usize);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// 工单键 (Work Order Key)
// ==========================================
// 单别 + 工单单号，唯一确定一张工单
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkOrderKey {
    pub order_type: String,
    pub order_no: String,
}

impl WorkOrderKey {
    pub fn new(order_type: impl Into<String>, order_no: impl Into<String>) -> Self {
        Self {
            order_type: order_type.into(),
            order_no: order_no.into(),
        }
    }
}

impl fmt::Display for WorkOrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.order_type, self.order_no)
    }
}

// ==========================================
// 车间筛选 (Workshop Filter)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "kind", content = "name")]
pub enum WorkshopFilter {
    All,
    Only(String),
}

impl WorkshopFilter {
    /// 根据界面选择值构造筛选（等于“全部车间”标签时不筛选）
    pub fn from_selection(selection: Option<&str>, all_label: &str) -> Self {
        match selection.map(str::trim) {
            None | Some("") => WorkshopFilter::All,
            Some(s) if s == all_label => WorkshopFilter::All,
            Some(s) => WorkshopFilter::Only(s.to_string()),
        }
    }

    pub fn accepts(&self, workshop: &str) -> bool {
        match self {
            WorkshopFilter::All => true,
            WorkshopFilter::Only(name) => name == workshop,
        }
    }
}

impl fmt::Display for WorkshopFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkshopFilter::All => write!(f, "ALL"),
            WorkshopFilter::Only(name) => write!(f, "{}", name),
        }
    }
}

// ==========================================
// 日期列标签 (Date Label)
// ==========================================
// Calendar: 可解析出完整日期的表头
// MonthDay: 不带年份的 "M/D" 文本，原样保留，不推断年份
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "kind", content = "value")]
pub enum DateLabel {
    Calendar(NaiveDate),
    MonthDay(String),
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLabel::Calendar(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DateLabel::MonthDay(raw) => write!(f, "{}", raw),
        }
    }
}

impl FromStr for DateLabel {
    type Err = String;

    /// 接受 `YYYY-MM-DD`、`YYYY/M/D` 或 `M/D`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(DateLabel::Calendar(date));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y/%m/%d") {
            return Ok(DateLabel::Calendar(date));
        }
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 2 && parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit())) {
            return Ok(DateLabel::MonthDay(s.to_string()));
        }
        Err(format!("无法识别的日期: {}", s))
    }
}
