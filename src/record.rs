// src/record.rs
//
// Inspection data in its three shapes:
//
// - RawInspection:    one element of the upstream JSON array, loosely typed.
// - InspectionRow:    renamed fields + lat/lon pulled out of `address`, still text.
//                     This is what the audit log sees.
// - InspectionRecord: coerced, geocoded, ready to draw. Lives in an InspectionTable.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::GeoPoint;
use crate::core::sanitize::{coerce_f64, normalize_ws, opt_text, parse_finite, value_text};

/// Columns every table reports, including an empty one.
pub const CANONICAL_COLUMNS: [&str; 5] = ["name", "score", "latitude", "longitude", "address"];

/// Columns of a populated table.
pub const COLUMNS: [&str; 6] = ["name", "inspection_date", "score", "latitude", "longitude", "address"];

/// Audit log column order.
pub const AUDIT_COLUMNS: [&str; 6] = ["name", "inspection_date", "score", "address", "latitude", "longitude"];

/// Upstream record. Every field is optional and may hold any JSON type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInspection {
    #[serde(default)]
    pub restaurant_name: Option<Value>,
    #[serde(default)]
    pub inspection_date: Option<Value>,
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub address: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InspectionRow {
    pub name: String,
    pub inspection_date: String,
    pub score: Option<Value>,
    pub address: Option<Value>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl From<RawInspection> for InspectionRow {
    fn from(raw: RawInspection) -> Self {
        let address = raw.address.filter(|a| !a.is_null());
        let sub = |key: &str| opt_text(address.as_ref().and_then(|a| a.get(key)));

        Self {
            name: opt_text(raw.restaurant_name.as_ref()).unwrap_or_default(),
            inspection_date: opt_text(raw.inspection_date.as_ref()).unwrap_or_default(),
            latitude: sub("latitude"),
            longitude: sub("longitude"),
            score: raw.score.filter(|s| !s.is_null()),
            address,
        }
    }
}

impl InspectionRow {
    /// Cells in `AUDIT_COLUMNS` order; missing values are empty.
    pub fn audit_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.inspection_date.clone(),
            self.score.as_ref().and_then(value_text).unwrap_or_default(),
            self.address.as_ref().map(Value::to_string).unwrap_or_default(),
            self.latitude.clone().unwrap_or_default(),
            self.longitude.clone().unwrap_or_default(),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InspectionRecord {
    pub name: String,
    pub inspection_date: String,
    pub score: Option<f64>,
    pub address: Option<Value>,
    pub latitude: f64,
    pub longitude: f64,
}

impl InspectionRecord {
    /// Coerce a row. `None` if latitude or longitude is missing or not a finite number.
    pub fn from_row(row: &InspectionRow) -> Option<Self> {
        let latitude = row.latitude.as_deref().and_then(parse_finite)?;
        let longitude = row.longitude.as_deref().and_then(parse_finite)?;
        Some(Self {
            name: row.name.clone(),
            inspection_date: row.inspection_date.clone(),
            score: row.score.as_ref().and_then(coerce_f64),
            address: row.address.clone(),
            latitude,
            longitude,
        })
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn has_position(&self) -> bool {
        self.position().is_finite()
    }

    /// Calendar day of the inspection, if the date parses.
    pub fn inspection_day(&self) -> Option<NaiveDate> {
        parse_inspection_date(&self.inspection_date).map(|dt| dt.date())
    }

    /// "1000 E 11TH ST, AUSTIN" from Socrata's `human_address`, which is itself JSON text.
    pub fn street_address(&self) -> Option<String> {
        let human = self.address.as_ref()?.get("human_address")?;
        let decoded;
        let human = match human {
            Value::String(s) => {
                decoded = serde_json::from_str::<Value>(s).ok()?;
                &decoded
            }
            other => other,
        };

        let parts: Vec<String> = ["address", "city"]
            .iter()
            .filter_map(|k| opt_text(human.get(*k)))
            .map(|s| normalize_ws(&s))
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() { None } else { Some(parts.join(", ")) }
    }

    /// Identity for "same restaurant, same place, same score".
    fn group_key(&self) -> (String, String, Option<u64>) {
        (
            self.name.clone(),
            self.address.as_ref().map(Value::to_string).unwrap_or_default(),
            self.score.map(f64::to_bits),
        )
    }

    fn date_key(&self) -> DateKey {
        DateKey(parse_inspection_date(&self.inspection_date), self.inspection_date.clone())
    }
}

/// Parsed date first, raw text as a tie-break for dates that do not parse.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct DateKey(Option<NaiveDateTime>, String);

/// Accepts Socrata floating timestamps (`2024-01-01T00:00:00.000`) and plain dates.
pub fn parse_inspection_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Drop records without a position, then keep only the latest inspection per
/// `(name, address, score)`. Exact repeats collapse to the first occurrence.
/// Order is otherwise preserved. Idempotent.
pub fn normalize(records: Vec<InspectionRecord>) -> Vec<InspectionRecord> {
    let records: Vec<InspectionRecord> = records.into_iter().filter(|r| r.has_position()).collect();

    let mut latest: HashMap<(String, String, Option<u64>), DateKey> = HashMap::new();
    for r in &records {
        let date = r.date_key();
        latest
            .entry(r.group_key())
            .and_modify(|cur| if date > *cur { *cur = date.clone() })
            .or_insert(date);
    }

    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            let key = r.group_key();
            let date = r.date_key();
            latest.get(&key) == Some(&date) && seen.insert((key, date))
        })
        .collect()
}

/// Normalized inspection records. Shape is stable: see `columns`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InspectionTable {
    records: Vec<InspectionRecord>,
}

impl InspectionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw rows: coerce, drop unplaceable rows, dedup.
    pub fn from_rows(rows: &[InspectionRow]) -> Self {
        let records = rows.iter().filter_map(InspectionRecord::from_row).collect();
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<InspectionRecord>) -> Self {
        Self { records: normalize(records) }
    }

    /// Re-run normalization. A no-op on a table that is already normalized.
    pub fn normalized(self) -> Self {
        Self::from_records(self.records)
    }

    pub fn columns(&self) -> &'static [&'static str] {
        if self.records.is_empty() { &CANONICAL_COLUMNS } else { &COLUMNS }
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn records(&self) -> &[InspectionRecord] { &self.records }
    pub fn iter(&self) -> std::slice::Iter<'_, InspectionRecord> { self.records.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: Value) -> RawInspection {
        serde_json::from_value(v).unwrap()
    }

    fn record(name: &str, date: &str, score: Option<f64>) -> InspectionRecord {
        InspectionRecord {
            name: s!(name),
            inspection_date: s!(date),
            score,
            address: Some(json!({"latitude": "30.26", "longitude": "-97.72"})),
            latitude: 30.26,
            longitude: -97.72,
        }
    }

    #[test]
    fn row_renames_and_extracts_coordinates() {
        let row = InspectionRow::from(raw(json!({
            "restaurant_name": "Cafe X",
            "inspection_date": "2024-01-01T00:00:00.000",
            "score": "95",
            "address": {"latitude": "30.26", "longitude": "-97.72"}
        })));
        assert_eq!(row.name, "Cafe X");
        assert_eq!(row.score, Some(json!("95")));
        assert_eq!(row.latitude.as_deref(), Some("30.26"));
        assert_eq!(row.longitude.as_deref(), Some("-97.72"));
    }

    #[test]
    fn row_tolerates_missing_and_odd_address() {
        let no_addr = InspectionRow::from(raw(json!({"restaurant_name": "A"})));
        assert!(no_addr.address.is_none());
        assert!(no_addr.latitude.is_none());

        let str_addr = InspectionRow::from(raw(json!({"restaurant_name": "B", "address": "somewhere"})));
        assert!(str_addr.latitude.is_none());
        assert!(InspectionRecord::from_row(&str_addr).is_none());

        let numeric_name = InspectionRow::from(raw(json!({"restaurant_name": 7})));
        assert_eq!(numeric_name.name, "7");
    }

    #[test]
    fn record_requires_numeric_coordinates() {
        let mut row = InspectionRow {
            latitude: Some(s!("30.26")),
            longitude: Some(s!("not a number")),
            ..InspectionRow::default()
        };
        assert!(InspectionRecord::from_row(&row).is_none());

        row.longitude = Some(s!("-97.72"));
        let rec = InspectionRecord::from_row(&row).unwrap();
        assert_eq!(rec.position(), GeoPoint::new(30.26, -97.72));
    }

    #[test]
    fn score_coercion_to_missing() {
        let row = InspectionRow {
            score: Some(json!("pending")),
            latitude: Some(s!("1")),
            longitude: Some(s!("2")),
            ..InspectionRow::default()
        };
        assert_eq!(InspectionRecord::from_row(&row).unwrap().score, None);
    }

    #[test]
    fn audit_cells_order_and_blanks() {
        let row = InspectionRow {
            name: s!("Cafe X"),
            inspection_date: s!("2024-01-01"),
            score: Some(json!(95)),
            address: None,
            latitude: Some(s!("30.26")),
            longitude: None,
        };
        assert_eq!(row.audit_cells(), vec!["Cafe X", "2024-01-01", "95", "", "30.26", ""]);
    }

    #[test]
    fn dates_parse_in_both_forms() {
        let a = parse_inspection_date("2024-03-05T00:00:00.000").unwrap();
        let b = parse_inspection_date("2024-03-05").unwrap();
        assert_eq!(a, b);
        assert!(parse_inspection_date("yesterday").is_none());
    }

    #[test]
    fn latest_inspection_survives() {
        let out = normalize(vec![
            record("Cafe X", "2023-06-01T00:00:00.000", Some(95.0)),
            record("Cafe X", "2024-01-01T00:00:00.000", Some(95.0)),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].inspection_date, "2024-01-01T00:00:00.000");
    }

    #[test]
    fn different_scores_are_different_groups() {
        let out = normalize(vec![
            record("Cafe X", "2023-06-01", Some(80.0)),
            record("Cafe X", "2024-01-01", Some(95.0)),
        ]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn exact_duplicates_collapse() {
        let out = normalize(vec![
            record("Cafe X", "2024-01-01", Some(95.0)),
            record("Cafe X", "2024-01-01", Some(95.0)),
            record("Taco Y", "2024-01-01", None),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].name, "Taco Y");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = InspectionTable::from_records(vec![
            record("A", "2023-01-01", Some(90.0)),
            record("A", "2024-01-01", Some(90.0)),
            record("B", "2024-02-01", None),
            record("B", "2024-02-01", None),
        ]);
        let twice = once.clone().normalized();
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn non_finite_positions_are_dropped() {
        let mut bad = record("A", "2024-01-01", Some(90.0));
        bad.latitude = f64::NAN;
        let table = InspectionTable::from_records(vec![bad, record("B", "2024-01-01", None)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].name, "B");
    }

    #[test]
    fn columns_are_canonical_when_empty() {
        let t = InspectionTable::empty();
        assert_eq!(t.columns(), &["name", "score", "latitude", "longitude", "address"]);

        let full = InspectionTable::from_records(vec![record("A", "2024-01-01", None)]);
        assert!(full.columns().contains(&"inspection_date"));
    }

    #[test]
    fn street_address_from_human_address_text() {
        let mut r = record("A", "2024-01-01", None);
        r.address = Some(json!({
            "latitude": "30.26",
            "longitude": "-97.72",
            "human_address": "{\"address\": \"1000  E 11TH ST\", \"city\": \"AUSTIN\", \"state\": \"TX\"}"
        }));
        assert_eq!(r.street_address().as_deref(), Some("1000 E 11TH ST, AUSTIN"));

        let plain = record("B", "2024-01-01", None);
        assert_eq!(plain.street_address(), None);
    }
}
