// src/fetch/fetcher.rs
use chrono::Local;

use crate::audit::{AuditSink, FileAuditSink};
use crate::config::options::{AuditTarget, FetchOptions};
use crate::error::FetchError;
use crate::query::QuerySpec;
use crate::record::{InspectionRow, InspectionTable};

use super::source::{HttpSource, InspectionSource};

#[derive(Clone, Debug, PartialEq)]
pub enum EmptyReason {
    /// The query ran; nothing (placeable) came back.
    NoData,
    /// The query failed. Already logged.
    Failed(FetchError),
}

/// Outcome of a fetch. There is no error path: failures are an empty result with a reason.
#[derive(Clone, Debug, PartialEq)]
pub enum Fetched {
    Data(InspectionTable),
    Empty(EmptyReason),
}

impl Fetched {
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Fetched::Empty(EmptyReason::Failed(e)) => Some(e),
            _ => None,
        }
    }

    /// The table, or an empty one with the canonical columns.
    pub fn into_table(self) -> InspectionTable {
        match self {
            Fetched::Data(table) => table,
            Fetched::Empty(_) => InspectionTable::empty(),
        }
    }
}

pub struct Fetcher {
    source: Box<dyn InspectionSource>,
    audit: Option<Box<dyn AuditSink>>,
    radius_m: f64,
    lookback_days: i64,
    limit: u32,
}

impl Fetcher {
    /// Fetcher over `source`, without an audit sink.
    pub fn new(source: impl InspectionSource + 'static, opts: &FetchOptions) -> Self {
        Self {
            source: Box::new(source),
            audit: None,
            radius_m: opts.radius_m,
            lookback_days: opts.lookback_days,
            limit: opts.limit,
        }
    }

    /// HTTP source plus whatever audit target the options name.
    pub fn from_options(opts: &FetchOptions) -> Self {
        let fetcher = Self::new(HttpSource::from_options(opts), opts);
        match &opts.audit {
            AuditTarget::File(path) => fetcher.with_audit(FileAuditSink::new(path.clone())),
            AuditTarget::Disabled => fetcher,
        }
    }

    pub fn with_audit(mut self, sink: impl AuditSink + 'static) -> Self {
        self.audit = Some(Box::new(sink));
        self
    }

    /// Latest inspections within the default radius of `(lat, lon)`.
    pub fn fetch(&self, lat: f64, lon: f64) -> Fetched {
        self.fetch_within(lat, lon, self.radius_m)
    }

    pub fn fetch_within(&self, lat: f64, lon: f64, radius_m: f64) -> Fetched {
        // "now" is taken per call; the window slides with the clock.
        let since = QuerySpec::since_for(Local::now().date_naive(), self.lookback_days);

        match QuerySpec::new(lat, lon, radius_m, since, self.limit) {
            Ok(spec) => self.fetch_spec(&spec),
            Err(e) => {
                loge!("Fetch: {e}");
                Fetched::Empty(EmptyReason::Failed(e))
            }
        }
    }

    pub fn fetch_spec(&self, spec: &QuerySpec) -> Fetched {
        let mut raw = match self.source.query(spec) {
            Ok(raw) => raw,
            Err(e) => {
                loge!("Fetch: Error fetching data: {e}");
                return Fetched::Empty(EmptyReason::Failed(e));
            }
        };

        if raw.is_empty() {
            logf!("Fetch: No records within {} m of ({}, {})", spec.radius_m, spec.latitude, spec.longitude);
            return Fetched::Empty(EmptyReason::NoData);
        }
        raw.truncate(spec.limit as usize);

        let rows: Vec<InspectionRow> = raw.into_iter().map(InspectionRow::from).collect();
        self.audit(&rows);

        let table = InspectionTable::from_rows(&rows);
        logf!("Fetch: OK fetched={} kept={}", rows.len(), table.len());

        if table.is_empty() {
            Fetched::Empty(EmptyReason::NoData)
        } else {
            Fetched::Data(table)
        }
    }

    fn audit(&self, rows: &[InspectionRow]) {
        if let Some(sink) = &self.audit {
            if let Err(e) = sink.append(rows) {
                logw!("Audit: append failed, ignoring: {e}");
            }
        }
    }
}
