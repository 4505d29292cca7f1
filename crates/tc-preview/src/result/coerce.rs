use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Bucket key as epoch milliseconds.
///
/// Numbers are taken as-is (floats truncated). Strings are tried as an
/// integer, a float, RFC 3339, a zone-less date-time (UTC) and a bare date
/// (midnight UTC).
pub(crate) fn coerce_key(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_key)),
        Value::String(s) => parse_key_str(s.trim()),
        _ => None,
    }
}

fn float_key(f: f64) -> Option<i64> {
    // `as` saturates, so bound-check to avoid clamping garbage into range.
    (f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64).then_some(f as i64)
}

fn parse_key_str(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    if let Some(n) = s.parse::<f64>().ok().and_then(float_key) {
        return Some(n);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Non-negative document count; anything unusable counts as zero.
pub(crate) fn coerce_count(value: &Value) -> u64 {
    count_value(value).unwrap_or(0)
}

/// A non-negative number or numeric string, rounded; `None` for anything
/// else (negative, null, boolean, free text).
pub(crate) fn count_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(float_count)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_count))
        }
        _ => None,
    }
}

fn float_count(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0).then(|| f.round() as u64)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numeric_keys() {
        assert_eq!(coerce_key(&json!(1700000000000i64)), Some(1_700_000_000_000));
        assert_eq!(coerce_key(&json!(1700000000000.9)), Some(1_700_000_000_000));
        assert_eq!(coerce_key(&json!("1700000000000")), Some(1_700_000_000_000));
    }

    #[test]
    fn date_string_keys() {
        assert_eq!(coerce_key(&json!("2023-11-14T22:13:20Z")), Some(1_700_000_000_000));
        assert_eq!(coerce_key(&json!("2023-11-14 22:13:20")), Some(1_700_000_000_000));
        assert_eq!(coerce_key(&json!("2023-11-14 22:13:20.500")), Some(1_700_000_000_500));
        assert_eq!(coerce_key(&json!("2023-11-14T22:13:20")), Some(1_700_000_000_000));
        assert_eq!(coerce_key(&json!("2023-11-14")), Some(1_699_920_000_000));
    }

    #[test]
    fn unusable_keys() {
        for v in [json!(null), json!("yesterday"), json!(""), json!(true), json!([1])] {
            assert_eq!(coerce_key(&v), None, "{v}");
        }
    }

    #[test]
    fn counts() {
        assert_eq!(coerce_count(&json!(7)), 7);
        assert_eq!(coerce_count(&json!(2.6)), 3);
        assert_eq!(coerce_count(&json!("12")), 12);
        assert_eq!(coerce_count(&json!(-4)), 0);
        assert_eq!(coerce_count(&json!(null)), 0);
        assert_eq!(coerce_count(&json!("n/a")), 0);
    }

    #[test]
    fn unusable_count_values() {
        assert_eq!(count_value(&json!(" 40 ")), Some(40));
        assert_eq!(count_value(&json!(0)), Some(0));
        for v in [json!(-5), json!("n/a"), json!(true), json!(null), json!("-1"), json!({})] {
            assert_eq!(count_value(&v), None, "{v}");
        }
    }
}
