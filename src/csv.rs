// src/csv.rs
use std::io::{self, Write};

use crate::classify::ScoreCategory;
use crate::core::geo::{haversine_m, GeoPoint};
use crate::record::InspectionTable;

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one delimited row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Table export ---------------- */

pub const EXPORT_HEADERS: [&str; 7] =
    ["Name", "Inspection date", "Score", "Category", "Latitude", "Longitude", "Distance (m)"];

/// One export row per record. Distance is measured from `origin` (the query point),
/// and left blank without one.
pub fn export_rows(table: &InspectionTable, origin: Option<GeoPoint>) -> Vec<Vec<String>> {
    table
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.inspection_date.clone(),
                r.score.map(|s| s.to_string()).unwrap_or_default(),
                ScoreCategory::classify(r.score).label().to_string(),
                r.latitude.to_string(),
                r.longitude.to_string(),
                origin
                    .map(|o| format!("{:.0}", haversine_m(o, r.position())))
                    .unwrap_or_default(),
            ]
        })
        .collect()
}

/// Render the table as CSV/TSV text.
pub fn to_export_string(
    table: &InspectionTable,
    origin: Option<GeoPoint>,
    include_headers: bool,
    sep: char,
) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        let _ = write_row(&mut buf, &EXPORT_HEADERS, sep);
    }
    for r in export_rows(table, origin) {
        let _ = write_row(&mut buf, r.as_slice(), sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
