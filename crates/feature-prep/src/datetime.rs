//! Calendar Feature Derivation

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tabular::{Table, Value};
use tracing::debug;

/// Formats tried for text cells, most specific first
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Naming heuristic: a column is treated as datetime-like when its name
/// contains the substring `Date` or `Time` (case-sensitive).
pub fn is_datetime_like(name: &str) -> bool {
    name.contains("Date") || name.contains("Time")
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(ts);
        }
    }
    // Date-only values land on midnight, time-only values on the epoch date.
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(time) = NaiveTime::parse_from_str(text, "%H:%M:%S") {
        return NaiveDate::from_ymd_opt(1970, 1, 1).map(|d| d.and_time(time));
    }
    None
}

fn parse_cell(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Timestamp(ts) => Some(*ts),
        Value::Text(text) => parse_text(text),
        _ => None,
    }
}

/// Derive `_hour`, `_day`, `_weekday`, `_month` columns from every
/// datetime-named column that parses, then drop the originals.
///
/// A datetime-named column whose cells fail to parse yields no derived
/// columns and is still dropped; nothing is reported beyond a debug log.
pub fn expand_datetime_columns(table: &mut Table) {
    let candidates: Vec<String> = table
        .column_names()
        .into_iter()
        .filter(|name| is_datetime_like(name))
        .map(String::from)
        .collect();

    for name in &candidates {
        let stamps: Option<Vec<NaiveDateTime>> = table
            .column(name)
            .map(|col| col.cells().iter().map(parse_cell).collect())
            .unwrap_or(None);

        let Some(stamps) = stamps else {
            debug!("Column {} did not parse as timestamps, dropping as-is", name);
            continue;
        };

        let derived: [(&str, fn(&NaiveDateTime) -> i64); 4] = [
            ("_hour", |ts| ts.hour() as i64),
            ("_day", |ts| ts.day() as i64),
            ("_weekday", |ts| ts.weekday().num_days_from_monday() as i64),
            ("_month", |ts| ts.month() as i64),
        ];

        for (suffix, extract) in derived {
            let cells: Vec<Value> = stamps.iter().map(|ts| Value::Int(extract(ts))).collect();
            if let Err(e) = table.push_column(format!("{name}{suffix}"), cells) {
                debug!("Skipping derived column for {}: {}", name, e);
            }
        }
    }

    for name in &candidates {
        table.drop_column(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn monday_morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_heuristic_matches_name_substrings() {
        assert!(is_datetime_like("Order_Date"));
        assert!(is_datetime_like("Order_Time"));
        assert!(is_datetime_like("DateOfBirth"));
        assert!(!is_datetime_like("Agent_Age"));
        // Case-sensitive on purpose
        assert!(!is_datetime_like("order_date"));
    }

    #[test]
    fn test_derives_four_columns_and_drops_original() {
        let mut table = Table::single_row([
            ("Order_Date", Value::Timestamp(monday_morning())),
            ("Agent_Age", Value::Int(30)),
        ]);
        expand_datetime_columns(&mut table);

        assert!(table.column("Order_Date").is_none());
        assert_eq!(
            table.column("Order_Date_hour").unwrap().cells()[0],
            Value::Int(9)
        );
        assert_eq!(
            table.column("Order_Date_day").unwrap().cells()[0],
            Value::Int(15)
        );
        // 2024-01-15 is a Monday
        assert_eq!(
            table.column("Order_Date_weekday").unwrap().cells()[0],
            Value::Int(0)
        );
        assert_eq!(
            table.column("Order_Date_month").unwrap().cells()[0],
            Value::Int(1)
        );
        // Non-datetime column untouched
        assert_eq!(table.column("Agent_Age").unwrap().cells()[0], Value::Int(30));
    }

    #[test]
    fn test_derived_values_stay_in_calendar_ranges() {
        let stamps = [
            NaiveDate::from_ymd_opt(2023, 12, 31)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        ];
        for ts in stamps {
            let mut table = Table::single_row([("Ship_Time", Value::Timestamp(ts))]);
            expand_datetime_columns(&mut table);
            let get = |suffix: &str| {
                table.column(&format!("Ship_Time{suffix}")).unwrap().cells()[0]
                    .as_f64()
                    .unwrap() as i64
            };
            assert!((0..=23).contains(&get("_hour")));
            assert!((1..=31).contains(&get("_day")));
            assert!((0..=6).contains(&get("_weekday")));
            assert!((1..=12).contains(&get("_month")));
        }
    }

    #[test]
    fn test_text_timestamps_parse() {
        let mut table = Table::single_row([("Pickup_Time", Value::from("2024-01-15 09:30:00"))]);
        expand_datetime_columns(&mut table);
        assert_eq!(
            table.column("Pickup_Time_hour").unwrap().cells()[0],
            Value::Int(9)
        );
    }

    #[test]
    fn test_unparseable_column_dropped_without_derivatives() {
        let mut table = Table::single_row([
            ("Order_Date", Value::from("not a timestamp")),
            ("Agent_Age", Value::Int(30)),
        ]);
        expand_datetime_columns(&mut table);

        assert!(table.column("Order_Date").is_none());
        assert!(table.column("Order_Date_hour").is_none());
        assert!(table.column("Order_Date_day").is_none());
        assert!(table.column("Order_Date_weekday").is_none());
        assert!(table.column("Order_Date_month").is_none());
        assert_eq!(table.column_names(), vec!["Agent_Age"]);
    }

    #[test]
    fn test_numeric_datetime_named_column_is_dropped() {
        // Name matches the heuristic but cells are numeric: no derivation,
        // still dropped.
        let mut table = Table::single_row([("Lead_Time", Value::Float(4.5))]);
        expand_datetime_columns(&mut table);
        assert_eq!(table.n_cols(), 0);
    }
}
