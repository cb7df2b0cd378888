// ==========================================
// 每日排程齐套模拟 - 排程表版式配置
// ==========================================
// 表头行号、关键列名、界面标签；只属于计划来源层，引擎不感知
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// 主表头所在行（工单单号、车间等）
    pub header_row: u32,
    /// 日期表头所在行（如 1/25, 1/26）
    pub date_row: u32,
    /// 数据起始行
    pub data_start_row: u32,
    pub workshop_column: String,
    pub order_type_column: String,
    pub order_no_column: String,
    /// 车间下拉框中“不筛选”的标签
    pub all_workshops_label: String,
    /// 车间为空时的归类
    pub unclassified_label: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_row: 2,
            date_row: 3,
            data_start_row: 4,
            workshop_column: "车间".to_string(),
            order_type_column: "单别".to_string(),
            order_no_column: "工单单号".to_string(),
            all_workshops_label: "全部车间".to_string(),
            unclassified_label: "未分类".to_string(),
        }
    }
}

impl SheetLayout {
    /// 版式自检
    ///
    /// # 规则
    /// - 行号从 1 开始
    /// - 数据起始行必须在两个表头行之后
    /// - 关键列名不能为空
    pub fn validate(&self) -> Result<(), String> {
        if self.header_row == 0 || self.date_row == 0 || self.data_start_row == 0 {
            return Err("行号必须从 1 开始".to_string());
        }
        if self.data_start_row <= self.header_row || self.data_start_row <= self.date_row {
            return Err(format!(
                "数据起始行 {} 必须大于表头行 {} 和日期行 {}",
                self.data_start_row, self.header_row, self.date_row
            ));
        }
        for (name, value) in [
            ("workshop_column", &self.workshop_column),
            ("order_type_column", &self.order_type_column),
            ("order_no_column", &self.order_no_column),
        ] {
            if value.trim().is_empty() {
                return Err(format!("列名 {} 不能为空", name));
            }
        }
        Ok(())
    }

    /// 必需的关键列
    pub fn required_columns(&self) -> [&str; 3] {
        [
            self.workshop_column.as_str(),
            self.order_type_column.as_str(),
            self.order_no_column.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = SheetLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.required_columns(), ["车间", "单别", "工单单号"]);
    }

    #[test]
    fn test_data_row_must_follow_headers() {
        let layout = SheetLayout {
            data_start_row: 3,
            ..SheetLayout::default()
        };
        assert!(layout.validate().is_err());
    }
}
