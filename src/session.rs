//! A rename session over one folder.
//!
//! Holds the listing, the active rules, the batch executor with its undo
//! ledger, and the log of successful renames. Everything lives as long as the
//! session does; nothing is persisted.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::executor::{validate_batch, BatchExecutor, OperationRecord, RenameOperation, UndoRecord};
use crate::export::{export_log, RenameLog};
use crate::output::{display_apply_result, display_preview, display_undo_result};
use crate::progress::Progress;
use crate::rules::{generate_new_name_on, RuleConfig};
use crate::scanner::{scan_folder, FileEntry};

pub struct Session {
    folder: PathBuf,
    files: Vec<FileEntry>,
    rules: RuleConfig,
    executor: BatchExecutor,
    log: RenameLog,
    progress: Progress,
    check_conflicts: bool,
}

impl Session {
    /// List `folder` and start a session with `rules`
    pub fn open(folder: &Path, rules: RuleConfig, progress: Progress) -> Result<Self, AppError> {
        let files = scan_folder(folder)?;
        info!("Opened {:?} with {} files", folder, files.len());

        Ok(Self {
            folder: folder.to_path_buf(),
            files,
            rules,
            executor: BatchExecutor::new(),
            log: RenameLog::new(),
            progress,
            check_conflicts: true,
        })
    }

    /// Skip the collision check before applying
    pub fn without_conflict_check(mut self) -> Self {
        self.check_conflicts = false;
        self
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn log(&self) -> &RenameLog {
        &self.log
    }

    pub fn can_undo(&self) -> bool {
        self.executor.can_undo()
    }

    pub fn set_rules(&mut self, rules: RuleConfig) {
        self.rules = rules;
    }

    /// Re-list the folder. Needed after any rename since entries are snapshots.
    pub fn reload(&mut self) -> Result<(), AppError> {
        self.files = scan_folder(&self.folder)?;
        debug!(count = self.files.len(), "Folder reloaded");
        Ok(())
    }

    /// Planned renames for the current listing, one per file in listing order
    pub fn preview(&self) -> Vec<RenameOperation> {
        let today = Local::now().date_naive();
        self.files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                let new_name = generate_new_name_on(&file.name, index, &self.rules, today);
                RenameOperation::new(file.path.clone(), new_name)
            })
            .collect()
    }

    /// Apply the preview to disk and refresh the listing.
    ///
    /// Once the batch has run its records are always returned. A listing that
    /// cannot be refreshed afterwards is only reported as a warning.
    pub fn apply(&mut self) -> Result<Vec<OperationRecord>, AppError> {
        if self.files.is_empty() {
            return Err(AppError::NoFiles {
                path: self.folder.clone(),
            });
        }

        let operations = self.preview();
        if self.check_conflicts {
            validate_batch(&operations)?;
        }

        let records = self
            .executor
            .apply_batch_with_progress(&operations, &mut self.progress);
        self.log.record_batch(&self.folder, &records);

        if let Err(e) = self.reload() {
            warn!("Could not re-list {:?} after renaming: {}", self.folder, e);
            self.progress.warn(&format!("Folder listing is out of date: {}", e));
        }

        Ok(records)
    }

    /// Revert the last applied batch and refresh the listing
    pub fn undo(&mut self) -> Result<Vec<UndoRecord>, AppError> {
        let results = self
            .executor
            .undo_last_batch_with_progress(&mut self.progress)?;
        self.reload()?;
        Ok(results)
    }

    pub fn export_log(&mut self, path: &Path) -> Result<PathBuf, AppError> {
        let written = export_log(self.log.entries(), path)?;
        self.progress.log_exported(&written);
        Ok(written)
    }
}

const HELP: &str = "\
Commands:
  preview          show the planned names
  apply            rename the files
  undo             revert the last applied batch
  reload           re-list the folder
  export <file>    write the rename log (.json for JSON, text otherwise)
  help             show this help
  quit             leave the session";

/// Read commands from `input` until `quit` or end of input.
///
/// Command errors are reported to `output` and the loop carries on.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(
        output,
        "{} files in {}. Type 'help' for commands.",
        session.files().len(),
        session.folder().display()
    )?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        debug!(command, argument, "Session command");

        let result = match command {
            "" => Ok(()),
            "preview" | "p" => display_preview(&session.preview(), output).map_err(io_error),
            "apply" | "a" => session
                .apply()
                .and_then(|records| display_apply_result(&records, output).map_err(io_error)),
            "undo" | "u" => session
                .undo()
                .and_then(|results| display_undo_result(&results, output).map_err(io_error)),
            "reload" | "r" => session.reload().and_then(|()| {
                writeln!(output, "{} files", session.files().len()).map_err(io_error)
            }),
            "export" | "e" if argument.is_empty() => {
                writeln!(output, "Usage: export <file>")?;
                Ok(())
            }
            "export" | "e" => session.export_log(Path::new(argument)).and_then(|path| {
                writeln!(output, "Log exported to: {}", path.display()).map_err(io_error)
            }),
            "help" | "h" | "?" => writeln!(output, "{}", HELP).map_err(io_error),
            "quit" | "q" | "exit" => break,
            other => {
                writeln!(output, "Unknown command: {} (type 'help')", other)?;
                Ok(())
            }
        };

        if let Err(e) = result {
            writeln!(output, "Error: {}", e.detailed_message())?;
        }
    }

    Ok(())
}

fn io_error(e: io::Error) -> AppError {
    AppError::Other(format!("Failed to display output: {}", e))
}
