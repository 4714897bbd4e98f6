// src/audit.rs
//
// Write-only audit log of raw fetched rows. Never read back by the app.
// The fetcher ignores the result of `append`; a broken log must not break a fetch.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::consts::AUDIT_SEP;
use crate::csv::write_row;
use crate::error::AuditError;
use crate::record::{InspectionRow, AUDIT_COLUMNS};

pub trait AuditSink: Send + Sync {
    fn append(&self, rows: &[InspectionRow]) -> Result<(), AuditError>;
}

/// Space-delimited file, appended per fetch. Header only when the file is new or empty.
pub struct FileAuditSink {
    path: PathBuf,
    sep: char,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), sep: AUDIT_SEP }
    }
}

impl AuditSink for FileAuditSink {
    fn append(&self, rows: &[InspectionRow]) -> Result<(), AuditError> {
        if rows.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let fresh = file.metadata()?.len() == 0;
        let mut out = BufWriter::new(file);

        if fresh {
            write_row(&mut out, &AUDIT_COLUMNS, self.sep)?;
        }
        for row in rows {
            write_row(&mut out, row.audit_cells().as_slice(), self.sep)?;
        }
        out.flush()?;
        Ok(())
    }
}
