// ==========================================
// 快照导入集成测试
// ==========================================
// 职责: 验证快照文件读取、规整，以及命令行执行流程
// ==========================================


use clap::Parser;
use shift_scheduler::app::{run, CliArgs};
use shift_scheduler::domain::types::{ClosureScope, Location, ShiftKey};
use shift_scheduler::importer::{ImportError, SnapshotLoader};
use test_helpers::*;

#[test]
fn test_load_snapshot_from_file() {
    let (_file, path) = write_snapshot_file(
        r#"{
            "staff": [
                {"id": "s-1", "name": "Ana", "avoidWeekendShifts": ["morning"], "daysOff": [2, 1]},
                {"name": "Ben", "locations": ["C"]}
            ],
            "closures": [{"id": "c-1", "date": "2024-03-10", "location": "all"}],
            "holidays": [{"date": "2024-03-29"}]
        }"#,
    );

    let snapshot = SnapshotLoader::from_path(&path).unwrap();
    assert_eq!(snapshot.staff.len(), 2);
    assert_eq!(snapshot.staff[0].id, "s-1");
    assert!(snapshot.staff[0].avoid_weekend_shifts.contains(&ShiftKey::Morning));
    assert_eq!(snapshot.staff[0].days_off, vec![1, 2]);
    assert_eq!(snapshot.staff[1].locations, vec![Location::C]);
    assert!(!snapshot.staff[1].id.is_empty());
    assert_eq!(snapshot.closures[0].location, ClosureScope::All);
    assert_eq!(snapshot.holidays[0].date, march(29));
    assert_eq!(snapshot.settings.month, None);
}

#[test]
fn test_lenient_days_off_and_negative_monthly_cap() {
    let (_file, path) = write_snapshot_file(
        r#"{
            "staff": [
                {"name": "Ana", "daysOff": [-1, 5, "9", 40]},
                {"name": "Ben", "monthlyCap": -10},
                {"name": "Cai"}
            ],
            "settings": {"month": "2024-03"}
        }"#,
    );

    let snapshot = SnapshotLoader::from_path(&path).unwrap();
    assert_eq!(snapshot.staff[0].days_off, vec![5, 9]);
    assert_eq!(snapshot.staff[1].monthly_cap, Some(0.0));

    let args = CliArgs::try_parse_from(["shift-scheduler", path.as_str()]).unwrap();
    let result = run(&args).unwrap();
    // 月上限为 0 的员工本月不排班
    assert_eq!(result.assignments_of("Ben").count(), 0);
    assert!(result
        .assignments_of("Ana")
        .all(|(date, _, _)| date != march(5) && date != march(9)));
}

#[test]
fn test_missing_file() {
    let err = SnapshotLoader::from_path("/nonexistent/dir/snapshot.json").unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_unknown_location_rejected() {
    let (_file, path) = write_snapshot_file(r#"{"staff":[{"name":"Ana","preferredLocation":"X"}]}"#);
    let err = SnapshotLoader::from_path(&path).unwrap_err();
    assert!(matches!(err, ImportError::JsonParseError(_)));
}

#[test]
fn test_cli_run_end_to_end() {
    let (_file, path) = write_snapshot_file(
        r#"{
            "staff": [{"name": "Ana"}, {"name": "Ben"}, {"name": "Cai", "locations": ["L"]}],
            "settings": {"month": "2024-03"}
        }"#,
    );

    let args = CliArgs::try_parse_from(["shift-scheduler", path.as_str()]).unwrap();
    let result = run(&args).unwrap();
    assert_eq!(result.month_meta.label, "March 2024");
    assert_eq!(result.stats.len(), 3);

    let args = CliArgs::try_parse_from(["shift-scheduler", path.as_str(), "2024-05"]).unwrap();
    let result = run(&args).unwrap();
    assert_eq!(result.month_meta.label, "May 2024");
}

#[test]
fn test_cli_run_reports_missing_month() {
    let (_file, path) = write_snapshot_file(r#"{"staff": [{"name": "Ana"}]}"#);
    let args = CliArgs::try_parse_from(["shift-scheduler", path.as_str()]).unwrap();
    let err = run(&args).unwrap_err();
    assert!(err.to_string().contains("Select a target month."));
}
