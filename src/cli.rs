// src/cli.rs
//
// Headless frontend: one map build for a location given on the command line,
// printed as CSV/TSV rows or as the JSON scene.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{bail, Result, WrapErr};

use crate::{
    builder::{MapBuild, MapBuilder},
    config::options::{AppOptions, AuditTarget, ExportFormat},
    csv::to_export_string,
    log::{self, LogTarget},
    progress::Progress,
    scene::SceneStatus,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
            Format::Json => ExportFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "inspection-map",
    about = "Latest restaurant inspection scores around a location"
)]
pub struct Cli {
    /// Latitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,

    /// Longitude in decimal degrees (west is negative).
    #[arg(long, allow_hyphen_values = true)]
    pub lon: String,

    /// Search radius in meters. Defaults to 800.
    #[arg(long, value_parser = parse_radius)]
    pub radius: Option<f64>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Header row for CSV/TSV output.
    #[arg(long, default_value_t = false)]
    pub include_headers: bool,

    /// Write here instead of stdout. A path without an extension gets one from --format.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Append raw fetched rows to this file.
    #[arg(long, conflicts_with = "no_audit")]
    pub audit: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub no_audit: bool,
}

fn parse_radius(text: &str) -> Result<f64, String> {
    let r: f64 = text.trim().parse().map_err(|e| format!("{e}"))?;
    if !r.is_finite() || r <= 0.0 {
        return Err(format!("radius must be a positive number of meters, got {text}"));
    }
    Ok(r)
}

impl Cli {
    /// Environment defaults overridden by whatever was passed on the command line.
    pub fn options(&self) -> AppOptions {
        let mut opts = AppOptions::from_env();
        if let Some(r) = self.radius {
            opts.fetch.radius_m = r;
        }
        if self.no_audit {
            opts.fetch.audit = AuditTarget::Disabled;
        } else if let Some(path) = &self.audit {
            opts.fetch.audit = AuditTarget::File(path.clone());
        }
        opts
    }
}

/// Progress lines on stderr, so stdout stays clean for the data.
struct CliProgress;

impl Progress for CliProgress {
    fn begin(&mut self, lat: f64, lon: f64) {
        eprintln!("Looking up inspections near ({lat}, {lon})");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn fail(&mut self, reason: &str) {
        eprintln!("{reason}");
    }
    fn finish(&mut self, points: usize) {
        eprintln!("{points} restaurant(s)");
    }
}

pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<()> {
    log::init(LogTarget::Stderr);

    let builder = MapBuilder::from_options(&cli.options());
    let build = builder.build(&cli.lat, &cli.lon, Some(&mut CliProgress));

    if let SceneStatus::Error(reason) = &build.scene.status {
        bail!("{}: {reason}", build.scene.title);
    }

    let format: ExportFormat = cli.format.into();
    let text = render(&build, format, cli.include_headers)?;
    match &cli.out {
        Some(path) => {
            let path = out_path(path, format);
            fs::write(&path, text).wrap_err_with(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn out_path(path: &Path, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.ext())
    }
}

/// Output text for one build.
pub fn render(build: &MapBuild, format: ExportFormat, include_headers: bool) -> Result<String> {
    match format.delimiter() {
        Some(sep) => Ok(to_export_string(&build.table, build.scene.center, include_headers, sep)),
        None => {
            let mut json = serde_json::to_string_pretty(&build.scene).wrap_err("serializing scene")?;
            json.push('\n');
            Ok(json)
        }
    }
}
