// ==========================================
// 每日排程齐套模拟 - 表格网格
// ==========================================
// 统一 Excel / CSV 读入后的单元格表示，按 1-based 绝对行列寻址
// ==========================================

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Bool(bool),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

fn has_leading_zero(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some('0'), Some(c)) if c.is_ascii_digit())
}

impl CellValue {
    /// CSV 字段：空白 → Empty，可解析为数字 → Number，其余 → Text
    pub fn from_csv_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        // 前导零的编号（如工单号 0001）保持文本
        if has_leading_zero(trimmed) {
            return CellValue::Text(trimmed.to_string());
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 数值单元格的值（文本不做转换）
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// 去空白后的文本表示；空单元格返回 None
    ///
    /// 整数值的数字不带小数点（工单号常被存成数字）
    pub fn as_trimmed_text(&self) -> Option<String> {
        let text = match self {
            CellValue::Empty => return None,
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Bool(b) => b.to_string(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ==========================================
// SheetGrid - 单个工作表
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    /// 第一行单元格对应的绝对行号（0-based）
    origin_row: u32,
    /// 第一列单元格对应的绝对列号（0-based）
    origin_col: u32,
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(origin_row: u32, origin_col: u32, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            origin_row,
            origin_col,
            rows,
        }
    }

    /// 按 1-based 绝对行列取单元格，越界视为空
    pub fn cell(&self, row: u32, col: u32) -> &CellValue {
        if row == 0 || col == 0 || row <= self.origin_row || col <= self.origin_col {
            return &EMPTY_CELL;
        }
        let r = (row - self.origin_row - 1) as usize;
        let c = (col - self.origin_col - 1) as usize;
        self.rows
            .get(r)
            .and_then(|cells| cells.get(c))
            .unwrap_or(&EMPTY_CELL)
    }

    /// 最后一行的 1-based 行号（空表为 0）
    pub fn last_row(&self) -> u32 {
        self.origin_row + self.rows.len() as u32
    }

    /// 遍历某一行的非空单元格: (1-based 列号, 单元格)
    pub fn row_cells(&self, row: u32) -> Vec<(u32, &CellValue)> {
        if row == 0 || row <= self.origin_row {
            return Vec::new();
        }
        let r = (row - self.origin_row - 1) as usize;
        match self.rows.get(r) {
            Some(cells) => cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(i, cell)| (self.origin_col + i as u32 + 1, cell))
                .collect(),
            None => Vec::new(),
        }
    }
}
