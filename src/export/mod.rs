//! Session rename log and its text/JSON export.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::executor::OperationRecord;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No rename operations to export")]
    Empty,

    #[error("Failed to write log file: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize log: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// One successful rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub old_name: String,
    pub new_name: String,
    pub folder: PathBuf,
}

/// Successful renames accumulated over a session. Undo does not remove
/// entries: the log is a record of what happened.
#[derive(Debug, Default)]
pub struct RenameLog {
    entries: Vec<LogEntry>,
}

impl RenameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every successful record of a batch
    pub fn record_batch(&mut self, folder: &Path, records: &[OperationRecord]) {
        let now = Utc::now();
        self.entries.extend(records.iter().filter(|r| r.success).map(|r| LogEntry {
            timestamp: now,
            old_name: r.old_name.clone(),
            new_name: r.new_name.clone(),
            folder: folder.to_path_buf(),
        }));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// `timestamp: old -> new`, one line per entry
pub fn format_text(entries: &[LogEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "{}: {} -> {}",
                e.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                e.old_name,
                e.new_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_json(entries: &[LogEntry]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Write the log to `path`. A `.json` extension selects JSON, anything else
/// the line-oriented text form.
pub fn export_log(entries: &[LogEntry], path: &Path) -> Result<PathBuf, ExportError> {
    if entries.is_empty() {
        return Err(ExportError::Empty);
    }

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let content = if is_json {
        format_json(entries)?
    } else {
        format_text(entries)
    };

    let temp_path = temp_path_for(path);
    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
    }
    fs::rename(&temp_path, path)?;

    info!("Rename log written to: {:?}", path);

    Ok(path.to_path_buf())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
