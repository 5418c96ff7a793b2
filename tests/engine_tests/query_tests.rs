//! Tests for Query parsing

use chrono::NaiveDate;
use recdex::query::{Query, QueryKind};
use recdex::scan::DateKey;
use recdex::RecdexError;

fn date_key() -> DateKey {
    DateKey::new("%m/%d/%Y")
}

#[test]
fn test_parse_prefix_trims_line() {
    let query = Query::parse(QueryKind::Prefix, "  0042\n", &date_key()).unwrap();

    assert_eq!(query, Query::Prefix("0042".to_string()));
    assert_eq!(query.kind(), QueryKind::Prefix);
}

#[test]
fn test_parse_prefix_rejects_non_digits() {
    let result = Query::parse_prefix("12x4");

    assert!(matches!(result, Err(RecdexError::InvalidQuery(_))));
}

#[test]
fn test_parse_date() {
    let query = Query::parse(QueryKind::Date, "06/25/1962", &date_key()).unwrap();

    assert_eq!(query, Query::Date(NaiveDate::from_ymd_opt(1962, 6, 25).unwrap()));
    assert_eq!(query.kind(), QueryKind::Date);
}

#[test]
fn test_parse_date_rejects_bad_input() {
    for line in ["", "1962-06-25", "13/01/1962", "nonsense"] {
        let result = Query::parse_date(line, &date_key());
        let err = result.unwrap_err();
        assert!(matches!(err, RecdexError::InvalidQuery(_)), "{:?}", line);
        assert!(err.is_recoverable());
    }
}
