mod codes;

pub use codes::ExitCode;

use crate::config::ConfigError;
use crate::executor::{BatchConflict, ExecutorError};
use crate::export::ExportError;
use crate::rules::RuleError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target folder not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Invalid rule: {message}")]
    InvalidRule { message: String },

    #[error("Rules file error: {message}")]
    RulesFile { path: PathBuf, message: String },

    #[error("Batch has conflicting target names")]
    ConflictingTargets { conflicts: Vec<String> },

    #[error("No files found in folder")]
    NoFiles { path: PathBuf },

    #[error("No operations to undo")]
    NoHistory,

    #[error("{failed} of {total} renames failed")]
    RenameFailures { failed: usize, total: usize },

    #[error("Log export failed: {message}")]
    LogExport { message: String },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::InvalidRule { .. } => ExitCode::InvalidRule,
            AppError::RulesFile { .. } => ExitCode::InvalidArguments,
            AppError::ConflictingTargets { .. } => ExitCode::ConflictingTargets,
            AppError::NoFiles { .. } => ExitCode::GeneralError,
            AppError::NoHistory => ExitCode::NothingToUndo,
            AppError::RenameFailures { .. } => ExitCode::RenameError,
            AppError::LogExport { .. } => ExitCode::LogExportError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified folder does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid folder path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::InvalidRule { message } => {
                format!(
                    "The rename rules are not valid:\n  {}\n\n\
                     The find field is a regular expression; escape characters\n\
                     such as ( [ . * + ? with a backslash to match them literally.\n\
                     Date formats: YYYY-MM-DD, MM-DD-YYYY, DD-MM-YYYY, YYYYMMDD.",
                    message
                )
            }

            AppError::RulesFile { path, message } => {
                format!(
                    "Could not load rules file:\n  {}\n  {}\n\n\
                     Ensure the file exists and is valid JSON.",
                    path.display(),
                    message
                )
            }

            AppError::ConflictingTargets { conflicts } => {
                let mut msg = String::from("Renaming would overwrite or merge files:\n");
                for conflict in conflicts.iter().take(10) {
                    msg.push_str(&format!("  - {}\n", conflict));
                }
                if conflicts.len() > 10 {
                    msg.push_str(&format!("  ... and {} more\n", conflicts.len() - 10));
                }
                msg.push_str(
                    "\nAdjust the rules (numbering makes names unique) \
                     or pass --force to rename anyway.",
                );
                msg
            }

            AppError::NoFiles { path } => {
                format!("No files found in folder:\n  {}", path.display())
            }

            AppError::NoHistory => String::from(
                "There is no rename batch to undo.\n\
                 Only the most recent batch of this session can be undone.",
            ),

            AppError::RenameFailures { failed, total } => {
                format!(
                    "{} of {} renames failed.\n\n\
                     Check file permissions and ensure no files are open.",
                    failed, total
                )
            }

            AppError::LogExport { message } => {
                format!("Failed to export log:\n  {}", message)
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<RuleError> for AppError {
    fn from(err: RuleError) -> Self {
        AppError::InvalidRule {
            message: err.to_string(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::RulesFile { path, message } => AppError::RulesFile { path, message },
        }
    }
}

impl From<BatchConflict> for AppError {
    fn from(err: BatchConflict) -> Self {
        AppError::ConflictingTargets {
            conflicts: err.conflicts.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl From<ExecutorError> for AppError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::NoHistory => AppError::NoHistory,
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::LogExport {
            message: err.to_string(),
        }
    }
}
