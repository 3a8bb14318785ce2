// ==========================================
// 导入层集成测试
// ==========================================
// 测试目标: 工作表 -> 人员记录全流程, 批量导入错误语义, 身份去重
// ==========================================

use std::path::PathBuf;
use timetable_scheduler::importer::sheet_reader::SheetGrid;
use timetable_scheduler::importer::{merge_records, IngestError, ScheduleIngestor};
use timetable_scheduler::logging;
use timetable_scheduler::{Candidate, SlotCoordinate};

fn grid(rows: Vec<Vec<&str>>) -> SheetGrid {
    SheetGrid::new(
        rows.into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect(),
    )
}

/// 标准课表：表头行在第 4 行, 两门课分布在周一第1节和周三第2节
fn standard_sheet(name_row: &str) -> SheetGrid {
    grid(vec![
        vec!["2025-2026学年第一学期 个人课程表"],
        vec![""],
        vec![name_row],
        vec![
            "节次", "星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日",
        ],
        vec![
            "1",
            "高等数学\n杜洪霞【2-6,8周】\n明华楼301",
            "",
            "",
            "",
            "",
            "",
            "",
        ],
        vec![
            "2",
            "",
            "",
            "大学物理\n李老师【3-9(单)周】\n理科楼b201",
            "",
            "",
            "",
            "",
        ],
    ])
}

#[test]
fn test_full_sheet_ingestion_flow() {
    logging::init_test();

    let sheet = standard_sheet("姓名:张三 年级:2023 院系:计算机学院 专业:软件工程");
    let record = ScheduleIngestor::ingest_sheet(&sheet, Some("张三.xlsx"));

    assert_eq!(record.identity.name, "张三");
    assert_eq!(record.identity.college.as_deref(), Some("计算机学院"));
    assert_eq!(record.entries.len(), 2);

    // 周一第1节: 2-6,8 周
    let math = &record.entries[0];
    assert_eq!(math.slot, SlotCoordinate::new(1, 1));
    assert_eq!(
        math.occurrences[0].weeks.iter().collect::<Vec<_>>(),
        vec![2, 3, 4, 5, 6, 8]
    );

    // 周三第2节: 单周 3,5,7,9
    let physics = &record.entries[1];
    assert_eq!(physics.slot, SlotCoordinate::new(3, 2));
    assert_eq!(
        physics.occurrences[0].weeks.iter().collect::<Vec<_>>(),
        vec![3, 5, 7, 9]
    );

    // 忙闲派生: 第 4 周只有高数, 第 5 周两门都在
    let candidate = Candidate::from_record(&record, 4);
    assert!(candidate.is_busy(SlotCoordinate::new(1, 1)));
    assert!(!candidate.is_busy(SlotCoordinate::new(3, 2)));

    let candidate = Candidate::from_record(&record, 5);
    assert!(candidate.is_busy(SlotCoordinate::new(3, 2)));
}

#[test]
fn test_sheet_without_anchor_is_not_an_error() {
    let sheet = grid(vec![vec!["姓名:李四"], vec!["这份文件没有课表网格"]]);
    let record = ScheduleIngestor::ingest_sheet(&sheet, Some("李四.xlsx"));
    assert_eq!(record.identity.name, "李四");
    assert!(record.entries.is_empty());
}

#[test]
fn test_identity_dedup_across_sheets() {
    let a = ScheduleIngestor::ingest_sheet(
        &standard_sheet("姓名:张三 年级:2023 院系:计算机学院 专业:软件工程"),
        Some("张三.xlsx"),
    );
    // 学院写法不同、来源文件不同, (姓名, 专业, 年级) 相同即同一人
    let b = ScheduleIngestor::ingest_sheet(
        &standard_sheet("姓名:张三 年级:2023 院系:计院 专业:软件工程"),
        Some("张三-第二份.xlsx"),
    );
    let distinct = ScheduleIngestor::ingest_sheet(
        &standard_sheet("姓名:张三 年级:2024 院系:计算机学院 专业:软件工程"),
        Some("另一个张三.xlsx"),
    );

    let merged = merge_records(vec![a, b, distinct]);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].entries.len(), 4); // 两份课表条目合并
    assert_eq!(merged[1].entries.len(), 2);
}

#[tokio::test]
async fn test_batch_empty_is_request_error() {
    let result = ScheduleIngestor::ingest_batch(Vec::new()).await;
    assert!(matches!(result, Err(IngestError::EmptyBatch)));
}

#[tokio::test]
async fn test_batch_all_files_failed() {
    logging::init_test();

    let paths = vec![
        PathBuf::from("tests/不存在的文件A.xlsx"),
        PathBuf::from("tests/不存在的文件B.xlsx"),
    ];
    let result = ScheduleIngestor::ingest_batch(paths).await;
    assert!(matches!(result, Err(IngestError::AllFilesFailed(2))));
}

#[tokio::test]
async fn test_batch_corrupt_file_counts_as_failure() {
    use std::io::Write;

    let mut bad = tempfile::NamedTempFile::with_suffix(".xlsx").unwrap();
    writeln!(bad, "不是 Excel").unwrap();

    let result = ScheduleIngestor::ingest_batch(vec![bad.path().to_path_buf()]).await;
    match result {
        Err(IngestError::AllFilesFailed(1)) => {}
        other => panic!("期望 AllFilesFailed, 实际 {:?}", other.map(|_| ())),
    }
}
