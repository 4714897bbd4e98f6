// tests/map_builder.rs
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use chrono::Local;
use serde_json::json;

use inspection_map::{
    audit::AuditSink,
    config::options::{FetchOptions, MapOptions},
    error::{AuditError, FetchError},
    query::QuerySpec,
    record::{InspectionRow, RawInspection, CANONICAL_COLUMNS},
    progress::Progress,
    EmptyReason, Fetched, Fetcher, InspectionSource, MapBuilder, SceneStatus,
};

/// Canned upstream that counts calls and remembers the last query.
#[derive(Clone)]
struct Scripted {
    result: Result<Vec<RawInspection>, FetchError>,
    calls: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<QuerySpec>>>,
}

impl Scripted {
    fn ok(rows: Vec<RawInspection>) -> Self {
        Self::with(Ok(rows))
    }
    fn with(result: Result<Vec<RawInspection>, FetchError>) -> Self {
        Self { result, calls: Arc::default(), last: Arc::default() }
    }
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InspectionSource for Scripted {
    fn query(&self, spec: &QuerySpec) -> Result<Vec<RawInspection>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(spec.clone());
        self.result.clone()
    }
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<InspectionRow>>>);

impl AuditSink for Recorder {
    fn append(&self, rows: &[InspectionRow]) -> Result<(), AuditError> {
        self.0.lock().unwrap().extend_from_slice(rows);
        Ok(())
    }
}

fn raw(name: &str, date: &str, score: &str, lat: &str, lon: &str) -> RawInspection {
    serde_json::from_value(json!({
        "restaurant_name": name,
        "inspection_date": date,
        "score": score,
        "address": {
            "latitude": lat,
            "longitude": lon,
            "human_address": "{\"address\": \"1000 E 11TH ST\", \"city\": \"AUSTIN\"}"
        }
    }))
    .unwrap()
}

fn builder(source: Scripted) -> MapBuilder {
    MapBuilder::new(Fetcher::new(source, &FetchOptions::default()), MapOptions::default())
}

#[test]
fn single_good_restaurant() {
    let source = Scripted::ok(vec![raw("Cafe X", "2024-01-01T00:00:00.000", "95", "30.26", "-97.72")]);
    let scene = builder(source.clone()).build_map("30.262189", "-97.723689");

    assert_eq!(scene.title, "Restaurant Inspection Scores");
    assert_eq!(scene.status, SceneStatus::Ready);
    assert_eq!(scene.points.len(), 1);

    let p = &scene.points[0];
    assert_eq!(p.style.color, "#8FBC8F");
    assert!(p.hover.text().contains("Cafe X"));
    assert_eq!(p.position.latitude, 30.26);
    assert_eq!(source.calls(), 1);
}

#[test]
fn geolocation_error_never_queries() {
    let source = Scripted::ok(vec![raw("Cafe X", "2024-01-01", "95", "30.26", "-97.72")]);
    let scene = builder(source.clone()).build_map("Error", "Error");

    assert_eq!(scene.title, "Error Generating Map");
    assert!(matches!(scene.status, SceneStatus::Error(_)));
    assert!(scene.is_empty());
    assert_eq!(source.calls(), 0);
}

#[test]
fn nothing_nearby_is_no_data() {
    let scene = builder(Scripted::ok(Vec::new())).build_map_at(30.262189, -97.723689);
    assert_eq!(scene.title, "No Inspection Data Found");
    assert_eq!(scene.status, SceneStatus::NoData);
    assert!(scene.points.is_empty());
}

#[test]
fn upstream_failure_degrades_to_empty_table() {
    let source = Scripted::with(Err(FetchError::Transport(s("timed out"))));
    let fetcher = Fetcher::new(source.clone(), &FetchOptions::default());

    let out = fetcher.fetch(30.262189, -97.723689);
    assert_eq!(out, Fetched::Empty(EmptyReason::Failed(FetchError::Transport(s("timed out")))));

    let table = out.into_table();
    assert!(table.is_empty());
    assert_eq!(table.columns(), &CANONICAL_COLUMNS);

    // Same failure through the builder: titled, empty, no error escapes.
    let scene = builder(source).build_map_at(30.262189, -97.723689);
    assert_eq!(scene.title, "No Inspection Data Found");
}

#[test]
fn http_status_failure_degrades_too() {
    let scene = builder(Scripted::with(Err(FetchError::Status(503)))).build_map("30.26", "-97.72");
    assert_eq!(scene.status, SceneStatus::NoData);
}

#[test]
fn duplicates_collapse_to_latest_inspection() {
    let rows = vec![
        raw("Taco Spot", "2023-05-01T00:00:00.000", "88", "30.27", "-97.74"),
        raw("Taco Spot", "2024-02-01T00:00:00.000", "88", "30.27", "-97.74"),
        raw("Taco Spot", "2024-02-01T00:00:00.000", "88", "30.27", "-97.74"),
        raw("Noodle Bar", "2024-02-03T00:00:00.000", "65", "30.28", "-97.75"),
    ];
    let audit = Recorder::default();
    let fetcher = Fetcher::new(Scripted::ok(rows), &FetchOptions::default()).with_audit(audit.clone());
    let b = MapBuilder::new(fetcher, MapOptions::default());

    let build = b.build("30.27", "-97.74", None);
    assert_eq!(build.scene.points.len(), 2);
    assert_eq!(build.table.len(), 2);

    let taco = &build.table.records()[0];
    assert_eq!(taco.name, "Taco Spot");
    assert_eq!(taco.inspection_date, "2024-02-01T00:00:00.000");
    assert_eq!(taco.street_address().as_deref(), Some("1000 E 11TH ST, AUSTIN"));

    // Red for the failing score
    assert_eq!(build.scene.points[1].style.color, "red");

    // The audit log sees what came over the wire, before dedup.
    assert_eq!(audit.0.lock().unwrap().len(), 4);
}

#[test]
fn never_more_rows_than_the_limit() {
    let rows: Vec<RawInspection> = (0..300)
        .map(|i| raw(&format!("R{i}"), "2024-01-01", "91", &format!("30.{i:03}"), "-97.72"))
        .collect();
    let scene = builder(Scripted::ok(rows)).build_map("30.26", "-97.72");
    assert!(scene.points.len() <= 250);
    assert_eq!(scene.points.len(), 250);
}

#[test]
fn query_uses_default_radius_and_window() {
    let source = Scripted::ok(Vec::new());
    let fetcher = Fetcher::new(source.clone(), &FetchOptions::default());
    let _ = fetcher.fetch(30.262189, -97.723689);

    let spec = source.last.lock().unwrap().clone().unwrap();
    assert_eq!(spec.radius_m, 800.0);
    assert_eq!(spec.limit, 250);
    assert_eq!(spec.latitude, 30.262189);

    let today = Local::now().date_naive();
    let days = (today - spec.since).num_days();
    // A midnight rollover between the two clock reads shifts this by one.
    assert!((548..=549).contains(&days), "window was {days} days");
}

#[test]
fn hover_never_leaks_styling() {
    let source = Scripted::ok(vec![raw("Cafe Y", "2024-01-01", "75", "30.26", "-97.72")]);
    let scene = builder(source).build_map("30.26", "-97.72");
    let p = &scene.points[0];
    assert_eq!(p.style.color, "#FEFE22");
    let text = p.hover.text();
    assert!(!text.contains('#'));
    assert!(text.contains("Score: 75"));
    assert!(text.contains("Inspection date: 2024-01-01"));
}

/// Remembers which hooks fired, in order.
#[derive(Default)]
struct Calls(Vec<String>);

impl Progress for Calls {
    fn log(&mut self, msg: &str) {
        self.0.push(format!("log {msg}"));
    }
    fn fail(&mut self, reason: &str) {
        self.0.push(format!("fail {reason}"));
    }
    fn finish(&mut self, points: usize) {
        self.0.push(format!("finish {points}"));
    }
}

#[test]
fn failures_reach_progress_through_fail() {
    let mut calls = Calls::default();
    let b = builder(Scripted::with(Err(FetchError::Status(500))));
    b.build("30.26", "-97.72", Some(&mut calls));
    let last_two = &calls.0[calls.0.len() - 2..];
    assert!(last_two[0].starts_with("fail "), "{:?}", calls.0);
    assert_eq!(last_two[1], "finish 0");
    assert!(!calls.0.iter().any(|c| c.starts_with("log ") && c.contains("500")));

    let mut calls = Calls::default();
    b.build("Error", "Error", Some(&mut calls));
    assert_eq!(calls.0.len(), 2);
    assert!(calls.0[0].starts_with("fail "));

    // An empty but healthy answer is not a failure.
    let mut calls = Calls::default();
    builder(Scripted::ok(Vec::new())).build("30.26", "-97.72", Some(&mut calls));
    assert!(!calls.0.iter().any(|c| c.starts_with("fail ")));
    assert_eq!(calls.0.last().map(String::as_str), Some("finish 0"));
}

fn s(v: &str) -> String {
    v.to_string()
}
