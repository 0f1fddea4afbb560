//! Progress output for user-facing status updates.
//!
//! The executor reports each rename and revert through this type. In verbose
//! mode output is suppressed since tracing already covers every step.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a new progress reporter writing to stderr
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: false,
            colors_enabled: should_use_colors(),
        }
    }

    /// Progress reporter that stays quiet when `verbose` is set
    pub fn for_verbosity(verbose: bool) -> Self {
        Self {
            silent: verbose,
            ..Self::new()
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Create a silent progress reporter
    pub fn silent() -> Self {
        Self {
            writer: Box::new(io::sink()),
            silent: true,
            colors_enabled: false,
        }
    }

    /// Report the start of a batch
    pub fn batch_start(&mut self, total: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        let line = format!("Renaming {} files", total);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.bold());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
    }

    /// Report progress on a single rename
    pub fn rename_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        self.step(current, total, from, to);
    }

    /// Report a failed rename (non-fatal)
    pub fn rename_failed(&mut self, from: &str, to: &str, error: &str) {
        self.warn(&format!("{} -> {} failed: {}", from, to, error));
    }

    /// Report batch complete
    pub fn batch_complete(&mut self, succeeded: usize, failed: usize) {
        self.summary(
            &format!("{} files renamed", succeeded),
            &format!("Renamed {} files with {} errors.", succeeded, failed),
            failed,
        );
    }

    /// Report starting an undo
    pub fn undo_start(&mut self, total: usize, from_timestamp: &str) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        let line = format!("Reverting {} files from batch ({})", total, from_timestamp);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.bold());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
    }

    /// Report progress on a single revert
    pub fn undo_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        self.step(current, total, from, to);
    }

    /// Report undo complete
    pub fn undo_complete(&mut self, succeeded: usize, failed: usize) {
        self.summary(
            &format!("{} files restored", succeeded),
            &format!("Reverted {} files with {} errors.", succeeded, failed),
            failed,
        );
    }

    /// Report an error during operation (non-fatal)
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    /// Report rename log written
    pub fn log_exported(&mut self, path: &std::path::Path) {
        if self.silent {
            return;
        }
        let line = format!("Log exported to: {}", path.display());
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
    }

    fn step(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} -> {}", current, total, from, to);
        }
    }

    fn summary(&mut self, clean: &str, with_errors: &str, failed: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if failed > 0 {
            if self.colors_enabled {
                let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), with_errors.yellow());
            } else {
                let _ = writeln!(self.writer, "{}", with_errors);
            }
        } else if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), clean.green());
        } else {
            let _ = writeln!(self.writer, "Done. {}.", clean);
        }
    }
}
