// ==========================================
// 每日排程齐套模拟 - 排程表解析（计划来源）
// ==========================================
// 阶段 1: 扫描主表头 → 列名映射，校验关键列
// 阶段 2: 扫描日期行 → 日期列映射
// 阶段 3: 按日期列 + 车间筛选抽取计划行
// ==========================================

use crate::config::SheetLayout;
use crate::domain::plan_line::PlanLine;
use crate::domain::types::{DateLabel, LineId, WorkOrderKey, WorkshopFilter};
use crate::importer::date_header::parse_date_header;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::GridReader;
use crate::importer::grid::SheetGrid;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info, warn};

// ==========================================
// PlanSheet - 已识别结构的排程表
// ==========================================
#[derive(Debug, Clone)]
pub struct PlanSheet {
    grid: SheetGrid,
    layout: SheetLayout,
    /// 主表头列名 → 1-based 列号
    columns: HashMap<String, u32>,
    /// 日期标签 → 1-based 列号
    date_columns: BTreeMap<DateLabel, u32>,
}

impl PlanSheet {
    /// 读取文件并识别结构
    pub fn open(path: &Path, sheet: Option<&str>, layout: SheetLayout) -> ImportResult<Self> {
        let grid = GridReader::open(path, sheet)?;
        Self::analyze(grid, layout)
    }

    /// 识别表头与日期列
    pub fn analyze(grid: SheetGrid, layout: SheetLayout) -> ImportResult<Self> {
        // 1. 扫描主表头（同名列以靠后者为准）
        let mut columns = HashMap::new();
        for (col, cell) in grid.row_cells(layout.header_row) {
            if let Some(name) = cell.as_trimmed_text() {
                columns.insert(name, col);
            }
        }

        let missing: Vec<String> = layout
            .required_columns()
            .iter()
            .filter(|c| !columns.contains_key(**c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns {
                row: layout.header_row,
                columns: missing,
            });
        }

        // 2. 扫描日期行
        let mut date_columns = BTreeMap::new();
        for (col, cell) in grid.row_cells(layout.date_row) {
            if let Some(label) = parse_date_header(cell) {
                date_columns.insert(label, col);
            }
        }

        match (date_columns.keys().next(), date_columns.keys().next_back()) {
            (Some(first), Some(last)) => info!(
                count = date_columns.len(),
                first = %first,
                last = %last,
                "识别到排程日期列"
            ),
            _ => warn!(row = layout.date_row, "日期行未找到任何日期格式的表头"),
        }

        Ok(Self {
            grid,
            layout,
            columns,
            date_columns,
        })
    }

    /// 主表头列号
    pub fn column(&self, name: &str) -> Option<u32> {
        self.columns.get(name).copied()
    }

    /// 全部日期标签（有序）
    pub fn dates(&self) -> Vec<DateLabel> {
        self.date_columns.keys().cloned().collect()
    }

    pub fn date_column(&self, label: &DateLabel) -> Option<u32> {
        self.date_columns.get(label).copied()
    }

    /// 数据行中出现过的车间（去重、排序，不含空值）
    pub fn workshops(&self) -> Vec<String> {
        let Some(col) = self.column(&self.layout.workshop_column) else {
            return Vec::new();
        };

        let mut set = BTreeSet::new();
        for row in self.layout.data_start_row..=self.grid.last_row() {
            if let Some(name) = self.grid.cell(row, col).as_trimmed_text() {
                set.insert(name);
            }
        }
        set.into_iter().collect()
    }

    /// 抽取指定日期列有排产数的计划行
    ///
    /// # 规则
    /// - 日期列单元格必须是大于 0 的数值（文本、空白跳过）
    /// - 车间为空归入 unclassified_label，再按车间筛选
    /// - 单别与工单单号都必须非空
    /// - 行号作为 LineId，保持表内顺序
    pub fn load_plan_lines(
        &self,
        date: &DateLabel,
        filter: &WorkshopFilter,
    ) -> ImportResult<Vec<PlanLine>> {
        let date_col = self
            .date_column(date)
            .ok_or_else(|| ImportError::UnknownDateColumn(date.to_string()))?;

        let missing = |name: &str| ImportError::MissingColumns {
            row: self.layout.header_row,
            columns: vec![name.to_string()],
        };
        let c_ws = self
            .column(&self.layout.workshop_column)
            .ok_or_else(|| missing(&self.layout.workshop_column))?;
        let c_type = self
            .column(&self.layout.order_type_column)
            .ok_or_else(|| missing(&self.layout.order_type_column))?;
        let c_no = self
            .column(&self.layout.order_no_column)
            .ok_or_else(|| missing(&self.layout.order_no_column))?;

        let mut plans = Vec::new();
        for row in self.layout.data_start_row..=self.grid.last_row() {
            let qty = match self.grid.cell(row, date_col).as_number() {
                Some(q) if q.is_finite() && q > 0.0 => q,
                _ => continue,
            };

            let workshop = self
                .grid
                .cell(row, c_ws)
                .as_trimmed_text()
                .unwrap_or_else(|| self.layout.unclassified_label.clone());
            if !filter.accepts(&workshop) {
                continue;
            }

            let (Some(order_type), Some(order_no)) = (
                self.grid.cell(row, c_type).as_trimmed_text(),
                self.grid.cell(row, c_no).as_trimmed_text(),
            ) else {
                debug!(row, "排产数有值但工单信息缺失，跳过");
                continue;
            };

            plans.push(PlanLine::new(
                LineId(row as usize),
                WorkOrderKey::new(order_type, order_no),
                qty,
                workshop,
            ));
        }

        info!(date = %date, workshop = %filter, count = plans.len(), "计划行抽取完成");
        Ok(plans)
    }
}
