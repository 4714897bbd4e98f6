// src/error.rs
use std::io;

use thiserror::Error;

/// Why a fetch produced no data. Never surfaced as an `Err` past the fetcher.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FetchError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("could not decode upstream response: {0}")]
    Decode(String),
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{axis} is not a number: {input:?}")]
pub struct CoordinateError {
    pub axis: Axis,
    pub input: String,
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit log I/O: {0}")]
    Io(#[from] io::Error),
}
