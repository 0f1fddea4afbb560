mod types;

pub use types::*;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::progress::Progress;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("No operations to undo")]
    NoHistory,
}

/// A reason a planned batch would clobber files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// Several files would receive the same name
    DuplicateTarget { new_name: String, sources: Vec<String> },
    /// The new name is already taken by a file outside the batch, or by a
    /// batch file that is only moved away later
    TargetExists { old_name: String, new_name: String },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::DuplicateTarget { new_name, sources } => {
                write!(f, "'{}' would be produced by {}", new_name, sources.join(", "))
            }
            Conflict::TargetExists { old_name, new_name } => {
                write!(f, "'{}' -> '{}': target already exists", old_name, new_name)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} conflicting rename(s) in batch", .conflicts.len())]
pub struct BatchConflict {
    pub conflicts: Vec<Conflict>,
}

/// Check a planned batch for name collisions before it is applied.
///
/// `apply_batch` never calls this; callers that want the safety net run it
/// first. Renames that keep their name are ignored.
pub fn validate_batch(operations: &[RenameOperation]) -> Result<(), BatchConflict> {
    let mut conflicts = Vec::new();

    let mut by_target: HashMap<&PathBuf, Vec<&RenameOperation>> = HashMap::new();
    let mut target_order: Vec<&PathBuf> = Vec::new();
    for op in operations {
        let group = by_target.entry(&op.new_path).or_default();
        if group.is_empty() {
            target_order.push(&op.new_path);
        }
        group.push(op);
    }

    let mut duplicated: HashSet<&PathBuf> = HashSet::new();
    for target in target_order {
        let group = &by_target[target];
        if group.len() > 1 {
            duplicated.insert(target);
            conflicts.push(Conflict::DuplicateTarget {
                new_name: group[0].new_name.clone(),
                sources: group.iter().map(|op| op.old_name.clone()).collect(),
            });
        }
    }

    // A target that is a batch source is only safe once that source has
    // been renamed away, i.e. when it comes earlier in the batch.
    let source_index: HashMap<&PathBuf, usize> = operations
        .iter()
        .enumerate()
        .map(|(i, op)| (&op.old_path, i))
        .collect();

    for (i, op) in operations.iter().enumerate() {
        if op.is_noop() || duplicated.contains(&op.new_path) || !op.new_path.exists() {
            continue;
        }
        match source_index.get(&op.new_path) {
            Some(&j) if j < i => {}
            _ => conflicts.push(Conflict::TargetExists {
                old_name: op.old_name.clone(),
                new_name: op.new_name.clone(),
            }),
        }
    }

    if conflicts.is_empty() {
        Ok(())
    } else {
        warn!(count = conflicts.len(), "Batch has conflicting targets");
        Err(BatchConflict { conflicts })
    }
}

/// Applies rename batches and keeps the ledger needed to revert the last one.
///
/// Apply and undo take `&mut self`, so one executor can never run two of
/// them at once.
#[derive(Debug, Default)]
pub struct BatchExecutor {
    history: HistoryStack,
}

impl BatchExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Apply every operation in order and record the batch.
    pub fn apply_batch(&mut self, operations: &[RenameOperation]) -> Vec<OperationRecord> {
        self.apply_batch_with_progress(operations, &mut Progress::silent())
    }

    /// Apply every operation in order, reporting each step.
    ///
    /// The target path is rebuilt from the directory of `old_path` and
    /// `new_name`. A failing rename is recorded and the batch carries on.
    pub fn apply_batch_with_progress(
        &mut self,
        operations: &[RenameOperation],
        progress: &mut Progress,
    ) -> Vec<OperationRecord> {
        let total = operations.len();
        info!("Applying batch of {} renames", total);
        progress.batch_start(total);

        let mut records = Vec::with_capacity(total);

        for (i, op) in operations.iter().enumerate() {
            let new_path = sibling_path(&op.old_path, &op.new_name);

            progress.rename_progress(i + 1, total, &op.old_name, &op.new_name);

            let record = match fs::rename(&op.old_path, &new_path) {
                Ok(()) => {
                    info!("Renamed: {} -> {}", op.old_name, op.new_name);
                    OperationRecord::succeeded(op, new_path)
                }
                Err(e) => {
                    warn!("Rename failed: {} -> {}: {}", op.old_name, op.new_name, e);
                    progress.rename_failed(&op.old_name, &op.new_name, &e.to_string());
                    OperationRecord::failed(op, new_path, e.to_string())
                }
            };

            records.push(record);
        }

        let entry = BatchEntry::new(records.clone());
        progress.batch_complete(entry.success_count(), entry.failure_count());
        debug!(
            succeeded = entry.success_count(),
            failed = entry.failure_count(),
            depth = self.history.len() + 1,
            "Batch recorded"
        );
        self.history.push(entry);

        records
    }

    /// Revert the most recent batch.
    pub fn undo_last_batch(&mut self) -> Result<Vec<UndoRecord>, ExecutorError> {
        self.undo_last_batch_with_progress(&mut Progress::silent())
    }

    /// Revert the most recent batch, reporting each step.
    ///
    /// The batch leaves the history whatever happens next. Only records that
    /// succeeded are reverted, newest first.
    pub fn undo_last_batch_with_progress(
        &mut self,
        progress: &mut Progress,
    ) -> Result<Vec<UndoRecord>, ExecutorError> {
        let entry = self.history.pop().ok_or(ExecutorError::NoHistory)?;

        let to_revert: Vec<&OperationRecord> =
            entry.operations.iter().rev().filter(|r| r.success).collect();
        let total = to_revert.len();

        info!(
            "Undoing batch from {} ({} renames)",
            entry.timestamp.to_rfc3339(),
            total
        );
        progress.undo_start(total, &entry.timestamp.to_rfc3339());

        let mut results = Vec::with_capacity(total);

        for (i, record) in to_revert.into_iter().enumerate() {
            progress.undo_progress(i + 1, total, &record.new_name, &record.old_name);

            let result = match fs::rename(&record.new_path, &record.old_path) {
                Ok(()) => {
                    info!("Reverted: {} -> {}", record.new_name, record.old_name);
                    UndoRecord {
                        name: record.new_name.clone(),
                        success: true,
                        reverted_to: Some(record.old_name.clone()),
                        error: None,
                    }
                }
                Err(e) => {
                    warn!(
                        "Revert failed: {} -> {}: {}",
                        record.new_name, record.old_name, e
                    );
                    progress.rename_failed(&record.new_name, &record.old_name, &e.to_string());
                    UndoRecord {
                        name: record.new_name.clone(),
                        success: false,
                        reverted_to: None,
                        error: Some(e.to_string()),
                    }
                }
            };

            results.push(result);
        }

        let succeeded = results.iter().filter(|r| r.success).count();
        progress.undo_complete(succeeded, results.len() - succeeded);

        Ok(results)
    }
}
