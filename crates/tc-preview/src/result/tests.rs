use serde_json::json;
use tc_config::DEFAULT_TIMESTAMP_CANDIDATES;

use super::*;

fn candidates() -> Vec<String> {
    DEFAULT_TIMESTAMP_CANDIDATES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn result(schema: Vec<ColumnDef>, rows: Vec<Vec<Value>>) -> TabularResult {
    TabularResult {
        schema,
        datarows: rows,
        total: None,
    }
}

fn keys(series: &HistogramSeries) -> Vec<i64> {
    series.buckets.iter().map(|b| b.key).collect()
}

// =========================================================================
// empty / unidentifiable input
// =========================================================================

#[test]
fn empty_result_is_empty_series() {
    let series = parse_histogram(&TabularResult::default(), &candidates());
    assert_eq!(series, HistogramSeries::default());
}

#[test]
fn empty_json_object() {
    let parsed = TabularResult::from_json(json!({"schema": [], "datarows": []})).unwrap();
    let series = parse_histogram(&parsed, &candidates());
    assert!(series.buckets.is_empty());
    assert_eq!(series.total, 0);
}

#[test]
fn unidentifiable_columns_fall_back_to_row_count() {
    let r = result(
        vec![ColumnDef::new("host"), ColumnDef::new("status")],
        vec![vec![json!("a"), json!(200)], vec![json!("b"), json!(500)]],
    );
    let series = parse_histogram(&r, &candidates());
    assert!(series.buckets.is_empty());
    assert_eq!(series.total, 2);
}

#[test]
fn explicit_total_beats_row_count() {
    let mut r = result(vec![ColumnDef::new("host")], vec![vec![json!("a")]]);
    r.total = Some(40);
    assert_eq!(parse_histogram(&r, &candidates()).total, 40);
}

#[test]
fn unusable_total_falls_back_to_row_count() {
    for bad in [json!("n/a"), json!(-5), json!(true), json!(null)] {
        let parsed = TabularResult::from_json(json!({
            "schema": [{"name": "host"}],
            "datarows": [["a"], ["b"], ["c"]],
            "total": bad.clone(),
        }))
        .unwrap();
        assert_eq!(parsed.total, None, "total {bad}");
        let series = parse_histogram(&parsed, &candidates());
        assert!(series.buckets.is_empty());
        assert_eq!(series.total, 3, "total {bad}");
    }
}

#[test]
fn numeric_string_total_is_honored() {
    let parsed = TabularResult::from_json(json!({"datarows": [["a"]], "total": "12"})).unwrap();
    assert_eq!(parse_histogram(&parsed, &candidates()).total, 12);
}

#[test]
fn key_without_count_column_yields_no_buckets() {
    let r = result(
        vec![ColumnDef::new("span(@timestamp,1h)"), ColumnDef::new("host")],
        vec![vec![json!(1), json!("a")]],
    );
    let series = parse_histogram(&r, &candidates());
    assert!(series.buckets.is_empty());
    assert_eq!(series.total, 1);
}

// =========================================================================
// column identification
// =========================================================================

#[test]
fn span_and_count_paren() {
    let r = result(
        vec![ColumnDef::new("span"), ColumnDef::new("count()")],
        vec![vec![json!(1_700_000_000_000i64), json!(7)]],
    );
    let series = parse_histogram(&r, &candidates());
    assert_eq!(
        series.buckets,
        vec![HistogramBucket {
            key: 1_700_000_000_000,
            doc_count: 7
        }]
    );
    assert_eq!(series.total, 7);
}

#[test]
fn count_column_may_come_first() {
    let r = result(
        vec![ColumnDef::new("count()"), ColumnDef::new("span(ts,1h)")],
        vec![vec![json!(3), json!("2024-01-01 01:00:00")]],
    );
    let series = parse_histogram(&r, &candidates());
    assert_eq!(series.buckets.len(), 1);
    assert_eq!(series.buckets[0].doc_count, 3);
}

#[test]
fn exact_span_beats_span_call() {
    let schema = vec![
        ColumnDef::new("span(ts,1h)"),
        ColumnDef::new("span"),
        ColumnDef::new("count"),
    ];
    assert_eq!(columns::key_column(&schema, &candidates()), Some(1));
}

#[test]
fn bucket_or_window_names() {
    let schema = vec![ColumnDef::new("Time_Bucket"), ColumnDef::new("doc_count")];
    assert_eq!(columns::key_column(&schema, &candidates()), Some(0));
    assert_eq!(columns::count_column(&schema, Some(0)), Some(1));

    let schema = vec![ColumnDef::new("total"), ColumnDef::new("WINDOW_START")];
    assert_eq!(columns::key_column(&schema, &candidates()), Some(1));
    assert_eq!(columns::count_column(&schema, Some(1)), Some(0));
}

#[test]
fn timestamp_type_fallback() {
    let schema = vec![
        ColumnDef::typed("host", "string"),
        ColumnDef::typed("ingested", "TIMESTAMP"),
        ColumnDef::typed("hits_value", "integer"),
    ];
    assert_eq!(columns::key_column(&schema, &candidates()), Some(1));
    assert_eq!(columns::count_column(&schema, Some(1)), Some(2));
}

#[test]
fn candidate_name_fallback() {
    let schema = vec![ColumnDef::new("host"), ColumnDef::new("@timestamp"), ColumnDef::new("count")];
    assert_eq!(columns::key_column(&schema, &candidates()), Some(1));
}

#[test]
fn first_matching_column_wins() {
    let schema = vec![
        ColumnDef::new("bucket_a"),
        ColumnDef::new("bucket_b"),
        ColumnDef::new("count"),
        ColumnDef::new("count()"),
    ];
    assert_eq!(columns::key_column(&schema, &candidates()), Some(0));
    assert_eq!(columns::count_column(&schema, Some(0)), Some(2));
}

#[test]
fn count_never_reuses_key_column() {
    // `window_value` matches both heuristics; it is claimed as the key.
    let schema = vec![ColumnDef::new("window_value"), ColumnDef::new("total")];
    assert_eq!(columns::key_column(&schema, &candidates()), Some(0));
    assert_eq!(columns::count_column(&schema, Some(0)), Some(1));
}

#[test]
fn count_fallback_is_case_sensitive() {
    let schema = vec![ColumnDef::new("span"), ColumnDef::new("Total")];
    assert_eq!(columns::count_column(&schema, Some(0)), None);
}

// =========================================================================
// rows
// =========================================================================

#[test]
fn rows_sorted_and_unparseable_keys_dropped() {
    let r = result(
        vec![ColumnDef::new("span"), ColumnDef::new("count")],
        vec![
            vec![json!("2024-01-01 02:00:00"), json!(5)],
            vec![json!("not a date"), json!(100)],
            vec![json!("2024-01-01 00:00:00"), json!(2)],
            vec![json!(null), json!(100)],
            vec![json!("2024-01-01T01:00:00Z"), json!("3")],
        ],
    );
    let series = parse_histogram(&r, &candidates());
    assert_eq!(
        keys(&series),
        vec![1_704_067_200_000, 1_704_070_800_000, 1_704_074_400_000]
    );
    assert_eq!(
        series.buckets.iter().map(|b| b.doc_count).collect::<Vec<_>>(),
        vec![2, 3, 5]
    );
    assert_eq!(series.total, 10);
}

#[test]
fn total_is_bucket_sum_even_with_explicit_total() {
    let mut r = result(
        vec![ColumnDef::new("span"), ColumnDef::new("count")],
        vec![vec![json!(1), json!(4)], vec![json!(2), json!(6)]],
    );
    r.total = Some(999);
    let series = parse_histogram(&r, &candidates());
    assert_eq!(series.total, 10);
    assert_eq!(series.total, series.bucket_sum());
}

#[test]
fn all_keys_unparseable_uses_fallback_total() {
    let r = result(
        vec![ColumnDef::new("span"), ColumnDef::new("count")],
        vec![vec![json!("x"), json!(4)], vec![json!("y"), json!(6)]],
    );
    let series = parse_histogram(&r, &candidates());
    assert!(series.buckets.is_empty());
    assert_eq!(series.total, 2);
}

#[test]
fn short_rows_tolerated() {
    let r = result(
        vec![ColumnDef::new("span"), ColumnDef::new("count")],
        vec![vec![json!(5)], vec![]],
    );
    let series = parse_histogram(&r, &candidates());
    assert_eq!(series.buckets, vec![HistogramBucket { key: 5, doc_count: 0 }]);
}

// =========================================================================
// decoding
// =========================================================================

#[test]
fn decode_full_payload() {
    let parsed = TabularResult::from_json_str(
        r#"{
            "schema": [{"name": "count()", "type": "integer"}, {"name": "span(@timestamp,1h)", "type": "timestamp"}],
            "datarows": [[4, "2024-01-01 00:00:00"]],
            "total": 1,
            "size": 1
        }"#,
    )
    .unwrap();
    assert_eq!(parsed.schema[1].column_type.as_deref(), Some("timestamp"));
    assert_eq!(parsed.total, Some(1));
}

#[test]
fn missing_keys_default_to_empty() {
    let parsed = TabularResult::from_json(json!({})).unwrap();
    assert_eq!(parsed, TabularResult::default());
}

#[test]
fn reject_wrong_shapes() {
    for bad in [
        json!(null),
        json!([]),
        json!("rows"),
        json!({"schema": "span"}),
        json!({"datarows": [1, 2]}),
        json!({"schema": [{"type": "integer"}]}),
    ] {
        let err = TabularResult::from_json(bad.clone());
        assert!(err.is_err(), "expected rejection of {bad}");
    }
}

#[test]
fn reject_invalid_json_text() {
    let err = TabularResult::from_json_str("{schema:").unwrap_err();
    assert!(err.to_string().contains("data format error"), "{err}");
}
