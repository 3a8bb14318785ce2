// ==========================================
// 课表排班系统 - 工作表读取
// ==========================================
// 职责: Excel 文件 -> 内存行列网格
// 支持: .xlsx / .xls
// 约束: 读取前检查文件大小, 防止恶意超大上传占满内存
// ==========================================

use crate::importer::error::{IngestError, IngestResult};
use calamine::{open_workbook_auto, Reader};
use std::path::Path;

/// 单文件大小上限（20 MB，正常课表导出远小于此值）
pub const MAX_FILE_SIZE_BYTES: u64 = 20 * 1024 * 1024;

// ==========================================
// 内存网格
// ==========================================
/// 一个工作表的全部单元格文本
///
/// 行列下标与工作表数据区一致；空单元格为长度为零的字符串。
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        SheetGrid { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 取单元格文本；越界返回 None
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

// ==========================================
// Excel 读取器
// ==========================================
pub struct ExcelSheetReader;

impl ExcelSheetReader {
    /// 读取文件的第一个工作表
    ///
    /// 一人一个文件，课表约定在首个 sheet。
    pub fn read_first_sheet(file_path: &Path) -> IngestResult<SheetGrid> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(IngestError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        // 检查扩展名
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(IngestError::UnsupportedFormat(ext));
        }

        // 检查文件大小
        let size = std::fs::metadata(file_path)?.len();
        if size > MAX_FILE_SIZE_BYTES {
            return Err(IngestError::FileTooLarge {
                size,
                limit: MAX_FILE_SIZE_BYTES,
            });
        }

        // 打开工作簿（按内容自动识别 xlsx/xls）
        let mut workbook = open_workbook_auto(file_path)
            .map_err(|e| IngestError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(IngestError::ExcelParseError(
                "Excel 文件无工作表".to_string(),
            ));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| IngestError::ExcelParseError(e.to_string()))?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        Ok(SheetGrid::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_file_not_found() {
        let result = ExcelSheetReader::read_first_sheet(Path::new("non_existent.xlsx"));
        assert!(matches!(result, Err(IngestError::FileNotFound(_))));
    }

    #[test]
    fn test_read_unsupported_extension() {
        let temp_file = NamedTempFile::with_suffix(".csv").unwrap();
        let result = ExcelSheetReader::read_first_sheet(temp_file.path());
        assert!(matches!(result, Err(IngestError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_read_corrupt_file_reports_parse_error() {
        let mut temp_file = NamedTempFile::with_suffix(".xlsx").unwrap();
        writeln!(temp_file, "这不是一个真正的 Excel 文件").unwrap();
        let result = ExcelSheetReader::read_first_sheet(temp_file.path());
        assert!(matches!(result, Err(IngestError::ExcelParseError(_))));
    }

    #[test]
    fn test_grid_cell_out_of_bounds() {
        let grid = SheetGrid::new(vec![vec!["a".to_string()]]);
        assert_eq!(grid.cell(0, 0), Some("a"));
        assert_eq!(grid.cell(0, 5), None);
        assert_eq!(grid.cell(3, 0), None);
    }
}
