use clap::Parser;
use std::path::PathBuf;

use crate::rules::{RawNumber, RawRuleConfig};

#[derive(Parser, Debug)]
#[command(name = "batch-renamer")]
#[command(author, version, long_about = None)]
#[command(about = "Batch-rename the files in a folder with prefix, suffix, numbering, date and find/replace rules")]
pub struct Args {
    /// Folder whose files should be renamed
    pub target_dir: PathBuf,

    /// Regular expression to replace in each base name
    #[arg(short, long, value_name = "PATTERN")]
    pub find: Option<String>,

    /// Replacement text for --find (empty when omitted)
    #[arg(short = 'w', long, value_name = "TEXT")]
    pub replace_with: Option<String>,

    /// Text to put in front of each base name
    #[arg(short, long, value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Text to append to each base name
    #[arg(short, long, value_name = "TEXT")]
    pub suffix: Option<String>,

    /// Append a sequence number to each base name
    #[arg(short, long)]
    pub number: bool,

    /// First sequence number (implies --number, default 1)
    #[arg(long, value_name = "N")]
    pub start: Option<String>,

    /// Zero-padded width of the sequence number (implies --number, default 3)
    #[arg(long, value_name = "N")]
    pub digits: Option<String>,

    /// Append today's date: YYYY-MM-DD, MM-DD-YYYY, DD-MM-YYYY or YYYYMMDD
    #[arg(long, value_name = "FORMAT", num_args = 0..=1, default_missing_value = "")]
    pub date: Option<String>,

    /// JSON file with rule settings; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Show the planned names without renaming anything
    #[arg(short, long)]
    pub dry: bool,

    /// Print the preview as tab-separated old/new names
    #[arg(long, requires = "dry")]
    pub plain: bool,

    /// Rename even if several files would end up with the same name or an
    /// existing file would be overwritten
    #[arg(long)]
    pub force: bool,

    /// Start a session reading preview/apply/undo/export commands from stdin
    #[arg(short, long, conflicts_with = "dry")]
    pub interactive: bool,

    /// Write the log of successful renames after applying
    #[arg(short, long, value_name = "FILE")]
    pub export_log: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Lay the rule flags over `raw`. Any rule-specific value enables its rule.
    pub fn apply_rule_flags(&self, raw: &mut RawRuleConfig) {
        if let Some(find) = &self.find {
            raw.replace.enabled = true;
            raw.replace.find = find.clone();
        }
        if let Some(with) = &self.replace_with {
            raw.replace.with = with.clone();
        }

        if let Some(prefix) = &self.prefix {
            raw.prefix.enabled = true;
            raw.prefix.text = prefix.clone();
        }

        if let Some(suffix) = &self.suffix {
            raw.suffix.enabled = true;
            raw.suffix.text = suffix.clone();
        }

        if self.number || self.start.is_some() || self.digits.is_some() {
            raw.numbering.enabled = true;
        }
        if let Some(start) = &self.start {
            raw.numbering.start = Some(RawNumber::Text(start.clone()));
        }
        if let Some(digits) = &self.digits {
            raw.numbering.digits = Some(RawNumber::Text(digits.clone()));
        }

        if let Some(format) = &self.date {
            raw.date_stamp.enabled = true;
            if !format.is_empty() {
                raw.date_stamp.format = Some(format.clone());
            }
        }
    }
}
