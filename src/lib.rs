pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod export;
pub mod logging;
pub mod output;
pub mod progress;
pub mod rules;
pub mod scanner;
pub mod session;

pub use error::{AppError, ExitCode};
pub use executor::{
    validate_batch, BatchConflict, BatchEntry, BatchExecutor, Conflict, ExecutorError,
    HistoryStack, OperationRecord, RenameOperation, UndoRecord,
};
pub use export::{export_log, format_json, format_text, ExportError, LogEntry, RenameLog};
pub use rules::{
    generate_new_name, generate_new_name_on, split_extension, DateFormat, RawRuleConfig,
    RuleConfig, RuleError,
};
pub use scanner::{scan_folder, FileEntry, ScannerError};
pub use session::{run_interactive, Session};
