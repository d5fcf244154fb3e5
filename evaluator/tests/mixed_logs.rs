use evaluator::EvaluationJob;
use util::report_config::ReportConfig;
use util::test_helpers::{setup_log_dir, structured_log_json, write_file};

const LEGACY_LOG: &str = r#"🚀 実験開始: json / en
📊 構造化ログ:
{"pattern": "contract", "level": 1, "iteration": 1,
 "expected_fields": [
   {"name": "title", "value": "Lease {A}", "status": "correct"},
   {"name": "url", "value": "http://x", "status": "wrong"}
 ],
 "unexpected_fields": [], "extraction_time": 2.0}
📊 構造化ログ:
{"pattern": "contract", "level": 2, "iteration": 1, "expected_fields": [
✅ 完了
"#;

#[test]
fn legacy_and_structured_logs_share_one_report() {
    let dir = setup_log_dir();
    write_file(dir.path(), "format_experiment_json_en.log", LEGACY_LOG);
    // identity comes from the file name only
    write_file(
        dir.path(),
        "structured/chat_abs_generable_ja_level2_1.json",
        r#"{"pattern": "chat", "expected_fields": [
            {"name": "title", "value": "a", "status": "correct"},
            {"name": "date", "value": "b", "status": "correct"}
        ], "unexpected_fields": [{"name": "x", "value": "y"}], "extraction_time": 4.0}"#,
    );
    write_file(
        dir.path(),
        "structured/generable_ja_chat_level1_2.json",
        &structured_log_json("generable", "ja", "chat", 1, &[("title", "missing")], &[]),
    );

    let report = EvaluationJob::new(dir.path(), ReportConfig::default()).run().unwrap();

    assert_eq!(report.summary.files_discovered, 3);
    assert_eq!(report.summary.files_parsed, 3);
    assert_eq!(report.summary.test_cases, 3);

    let by_method = &report.groups["by_method"];
    assert_eq!(by_method["json"].tests, 1);
    assert_eq!(by_method["json"].wrong_items, 1);
    assert_eq!(by_method["generable"].tests, 2);
    assert_eq!(by_method["generable"].expected_items, 3);
    assert_eq!(by_method["generable"].unexpected_items, 1);

    assert_eq!(report.groups["by_language"].keys().collect::<Vec<_>>(), vec!["en", "ja"]);
    assert!(report.groups["by_algo_level"].contains_key("abs_level2"));
    assert!(report.groups["by_experiment"].contains_key("json_en"));

    // (1 - 1) / 2 for json, (2 - 0 - 1) / 3 for generable, (3 - 1 - 1) / 5 overall
    assert!((by_method["json"].normalized_score - 0.0).abs() < 1e-9);
    assert!((by_method["generable"].normalized_score - 1.0 / 3.0).abs() < 1e-9);
    assert!((report.overall.normalized_score - 0.2).abs() < 1e-9);

    assert!((report.timing.overall.avg - 3.0).abs() < 1e-9);
    assert_eq!(report.analysis.axes["by_method"].best.key, "generable");
}

#[test]
fn csv_lists_overall_row_first() {
    let dir = setup_log_dir();
    write_file(
        dir.path(),
        "generable_ja_chat_level1_1.json",
        &structured_log_json("generable", "ja", "chat", 1, &[("title", "correct")], &[]),
    );

    let report = EvaluationJob::new(dir.path(), ReportConfig::default()).run().unwrap();
    let csv = report.to_csv(2);
    let lines: Vec<&str> = csv.split("\r\n").collect();

    assert!(lines[0].starts_with("axis,group,tests"));
    assert_eq!(lines[1], "overall,all,1,1,1,0,0,0,0,1.00,0.00");
    assert!(lines[2].starts_with("by_method,generable,1,"));
}
