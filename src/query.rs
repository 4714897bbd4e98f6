// src/query.rs
//! SoQL query for one radius + time-window fetch.
//!
//! The upstream does the heavy lifting:
//! - `within_circle(address, lat, lon, r)` is a geodesic containment test, not a bbox.
//! - `$group` + `$having inspection_date = max(inspection_date)` keeps the latest
//!   inspection per restaurant/address/score.
//! - `$limit` caps the result; there is no paging.

use chrono::{NaiveDate, TimeDelta};

use crate::error::FetchError;

pub const SELECT: &str = "restaurant_name, inspection_date, score, address";
pub const GROUP: &str = "restaurant_name, inspection_date, address, score";
pub const HAVING: &str = "inspection_date = max(inspection_date)";

#[derive(Clone, Debug, PartialEq)]
pub struct QuerySpec {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
    pub since: NaiveDate,
    pub limit: u32,
}

impl QuerySpec {
    /// Validates inputs; coordinates must be finite and the radius positive.
    pub fn new(
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        since: NaiveDate,
        limit: u32,
    ) -> Result<Self, FetchError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(FetchError::InvalidQuery(format!(
                "coordinates must be finite, got ({latitude}, {longitude})"
            )));
        }
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(FetchError::InvalidQuery(format!(
                "radius must be positive, got {radius_m}"
            )));
        }
        Ok(Self { latitude, longitude, radius_m, since, limit })
    }

    /// Start of the look-back window.
    pub fn since_for(today: NaiveDate, lookback_days: i64) -> NaiveDate {
        today
            .checked_sub_signed(TimeDelta::days(lookback_days))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Floating timestamp at midnight, the form the dataset stores.
    pub fn since_timestamp(&self) -> String {
        format!("{}T00:00:00.000", self.since.format("%Y-%m-%d"))
    }

    pub fn where_clause(&self) -> String {
        format!(
            "within_circle(address, {}, {}, {}) AND inspection_date >= '{}'",
            self.latitude,
            self.longitude,
            self.radius_m,
            self.since_timestamp()
        )
    }

    /// Query-string pairs, in request order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("$select", s!(SELECT)),
            ("$where", self.where_clause()),
            ("$group", s!(GROUP)),
            ("$having", s!(HAVING)),
            ("$limit", self.limit.to_string()),
        ]
    }
}
