use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A single planned rename, built by the caller from a listed file and the
/// name the rule engine produced for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameOperation {
    /// Current file name
    pub old_name: String,
    /// Name the file should get
    pub new_name: String,
    /// Full path to the file as listed
    pub old_path: PathBuf,
    /// Full path the file would end up at
    pub new_path: PathBuf,
}

impl RenameOperation {
    pub fn new(old_path: PathBuf, new_name: String) -> Self {
        let old_name = old_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let new_path = sibling_path(&old_path, &new_name);

        Self {
            old_name,
            new_name,
            old_path,
            new_path,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.old_path == self.new_path
    }
}

/// `new_name` placed in the directory that holds `old_path`
pub fn sibling_path(old_path: &Path, new_name: &str) -> PathBuf {
    old_path
        .parent()
        .map(|p| p.join(new_name))
        .unwrap_or_else(|| PathBuf::from(new_name))
}

/// Outcome of attempting one rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationRecord {
    pub old_name: String,
    pub new_name: String,
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationRecord {
    pub fn succeeded(op: &RenameOperation, new_path: PathBuf) -> Self {
        Self {
            old_name: op.old_name.clone(),
            new_name: op.new_name.clone(),
            old_path: op.old_path.clone(),
            new_path,
            success: true,
            error: None,
        }
    }

    pub fn failed(op: &RenameOperation, new_path: PathBuf, error: String) -> Self {
        Self {
            old_name: op.old_name.clone(),
            new_name: op.new_name.clone(),
            old_path: op.old_path.clone(),
            new_path,
            success: false,
            error: Some(error),
        }
    }
}

/// Outcome of reverting one previously successful rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoRecord {
    /// Name the file had after the batch
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverted_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Every record produced by one apply, in submission order
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub timestamp: DateTime<Utc>,
    pub operations: Vec<OperationRecord>,
}

impl BatchEntry {
    pub fn new(operations: Vec<OperationRecord>) -> Self {
        Self {
            timestamp: Utc::now(),
            operations,
        }
    }

    pub fn success_count(&self) -> usize {
        self.operations.iter().filter(|r| r.success).count()
    }

    pub fn failure_count(&self) -> usize {
        self.operations.len() - self.success_count()
    }
}

/// Applied batches, most recent last. Lives only as long as its owner.
#[derive(Debug, Default)]
pub struct HistoryStack {
    entries: Vec<BatchEntry>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: BatchEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<BatchEntry> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&BatchEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
