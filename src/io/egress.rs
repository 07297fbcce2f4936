//! Session report sink
//!
//! One finished session becomes one JSON line appended to the configured
//! file. Missing parent directories are created on first write.

use crate::domain::report::SessionReport;
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Appends session reports as JSONL
pub struct Egress {
    path: PathBuf,
}

impl Egress {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        info!(file = %path.display(), "egress_initialized");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `report` as a single line
    pub fn write_report(&self, report: &SessionReport) -> anyhow::Result<()> {
        let line = report.to_json();

        let written = self.open().and_then(|mut file| {
            writeln!(file, "{line}")
                .with_context(|| format!("Failed to write session report to {}", self.path.display()))
        });
        if let Err(e) = &written {
            error!(sid = %report.sid, error = %format!("{e:#}"), "session_egress_failed");
            return written;
        }

        debug!(file = %self.path.display(), bytes = %line.len(), "egress_written");
        info!(
            sid = %report.sid,
            stops = %report.stops.len(),
            not_found = %report.not_found.len(),
            cart_items = %report.cart_items.len(),
            "session_egressed"
        );
        Ok(())
    }

    fn open(&self) -> anyhow::Result<fs::File> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create egress directory {}", dir.display()))?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open egress file {}", self.path.display()))
    }
}
