// ==========================================
// 课表排班系统 - 导入层
// ==========================================
// 职责: 外部课表文件 -> 规范化人员课表记录
// 流程: 工作表读取 -> 布局定位 -> 逐格解析 -> 身份去重合并
// ==========================================

// 模块声明
pub mod cell_parser;
pub mod error;
pub mod ingestor;
pub mod layout_locator;
pub mod sheet_reader;
pub mod week_expander;

// 重导出核心类型
pub use cell_parser::CellParser;
pub use error::{IngestError, IngestResult};
pub use ingestor::{merge_records, BatchOutcome, FileFailure, ScheduleIngestor, DEFAULT_MAX_WEEK};
pub use layout_locator::{TableLayout, TableLayoutLocator};
pub use sheet_reader::{ExcelSheetReader, SheetGrid, MAX_FILE_SIZE_BYTES};
pub use week_expander::WeekSetExpander;
