// ==========================================
// 课表排班系统 - 表格布局定位器
// ==========================================
// 职责: 在工作表中定位课表网格的坐标基准
// 锚点: 首个包含"星期一"的单元格
// ==========================================

use crate::importer::sheet_reader::SheetGrid;

/// 课表网格布局：由锚点推导出的坐标基准
///
/// (data_start_row + p - 1, anchor_column + d - 1) 即星期 d 第 p 节的单元格。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// "星期一"所在列（即周一数据列）
    pub anchor_column: usize,
    /// 表头下一行，课表数据起始行
    pub data_start_row: usize,
}

pub struct TableLayoutLocator;

impl TableLayoutLocator {
    /// 逐行扫描定位锚点
    ///
    /// 不假设表头的固定行号，不同院校导出的课表表头行高不一。
    /// 返回 None 表示该工作表没有课表网格。
    pub fn locate(grid: &SheetGrid) -> Option<TableLayout> {
        for (row_idx, row) in grid.rows().iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if cell.contains("星期一") {
                    return Some(TableLayout {
                        anchor_column: col_idx,
                        data_start_row: row_idx + 1,
                    });
                }
            }
        }
        None
    }
}
