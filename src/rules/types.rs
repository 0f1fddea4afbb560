use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_NUMBER_START: i64 = 1;
pub const DEFAULT_NUMBER_DIGITS: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Invalid find pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Unknown date format: {0}")]
    UnknownDateFormat(String),
}

/// Date layouts available to the date stamp rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "YYYY-MM-DD")]
    YearMonthDay,
    #[serde(rename = "MM-DD-YYYY")]
    MonthDayYear,
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYear,
    #[serde(rename = "YYYYMMDD")]
    Compact,
}

impl DateFormat {
    pub const ALL: [DateFormat; 4] = [
        DateFormat::YearMonthDay,
        DateFormat::MonthDayYear,
        DateFormat::DayMonthYear,
        DateFormat::Compact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateFormat::YearMonthDay => "YYYY-MM-DD",
            DateFormat::MonthDayYear => "MM-DD-YYYY",
            DateFormat::DayMonthYear => "DD-MM-YYYY",
            DateFormat::Compact => "YYYYMMDD",
        }
    }

    /// chrono format string for this layout
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::YearMonthDay => "%Y-%m-%d",
            DateFormat::MonthDayYear => "%m-%d-%Y",
            DateFormat::DayMonthYear => "%d-%m-%Y",
            DateFormat::Compact => "%Y%m%d",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DateFormat {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DateFormat::ALL
            .into_iter()
            .find(|format| format.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RuleError::UnknownDateFormat(s.to_string()))
    }
}

/// Regex find/replace applied to the base name
#[derive(Debug, Clone, Default)]
pub struct ReplaceRule {
    pub enabled: bool,
    pattern: Option<Regex>,
    pub with: String,
}

impl ReplaceRule {
    /// Build an enabled rule, compiling `find` up front.
    ///
    /// An empty `find` yields a rule that never matches, the same as leaving
    /// the field blank in a form.
    pub fn new(find: &str, with: &str) -> Result<Self, RuleError> {
        let pattern = if find.is_empty() {
            None
        } else {
            Some(Regex::new(find).map_err(|e| RuleError::InvalidPattern {
                pattern: find.to_string(),
                message: e.to_string(),
            })?)
        };

        Ok(Self {
            enabled: true,
            pattern,
            with: with.to_string(),
        })
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

}

/// Prefix or suffix text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRule {
    pub enabled: bool,
    pub text: String,
}

impl TextRule {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            enabled: true,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingRule {
    pub enabled: bool,
    pub start: i64,
    pub digits: usize,
}

impl NumberingRule {
    pub fn new(start: i64, digits: usize) -> Self {
        Self {
            enabled: true,
            start,
            digits,
        }
    }
}

impl Default for NumberingRule {
    fn default() -> Self {
        Self {
            enabled: false,
            start: DEFAULT_NUMBER_START,
            digits: DEFAULT_NUMBER_DIGITS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateStampRule {
    pub enabled: bool,
    pub format: DateFormat,
}

impl DateStampRule {
    pub fn new(format: DateFormat) -> Self {
        Self {
            enabled: true,
            format,
        }
    }
}

/// Validated rule set. Applied in field order: replace, prefix, suffix,
/// numbering, date stamp.
#[derive(Debug, Clone, Default)]
pub struct RuleConfig {
    pub replace: ReplaceRule,
    pub prefix: TextRule,
    pub suffix: TextRule,
    pub numbering: NumberingRule,
    pub date_stamp: DateStampRule,
}

impl RuleConfig {
    /// True when no rule would touch a name
    pub fn is_identity(&self) -> bool {
        !self.replace.enabled
            && !self.prefix.enabled
            && !self.suffix.enabled
            && !self.numbering.enabled
            && !self.date_stamp.enabled
    }
}

/// Numeric form value that may arrive as a JSON number, as text or as
/// anything else a hand-written rules file contains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawNumber {
    /// Integer value, read the way a text field is: fractions are truncated
    /// and text only needs to start with an integer (`"5abc"` is 5).
    fn as_i64(&self) -> Option<i64> {
        match self {
            RawNumber::Number(n) => Some(*n),
            RawNumber::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            RawNumber::Float(_) => None,
            RawNumber::Text(s) => leading_integer(s),
            RawNumber::Other(_) => None,
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits_len = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return None;
    }
    text[..sign_len + digits_len].parse().ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReplace {
    pub enabled: bool,
    pub find: String,
    pub with: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawText {
    pub enabled: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawNumbering {
    pub enabled: bool,
    pub start: Option<RawNumber>,
    pub digits: Option<RawNumber>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDateStamp {
    pub enabled: bool,
    pub format: Option<String>,
}

/// Loosely typed rule input as it comes from a form, a rules file or
/// command-line flags. Defaulting happens in [`RawRuleConfig::into_rule_config`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawRuleConfig {
    pub replace: RawReplace,
    pub prefix: RawText,
    pub suffix: RawText,
    pub numbering: RawNumbering,
    pub date_stamp: RawDateStamp,
}

impl RawRuleConfig {
    /// Validate and default every field.
    ///
    /// Numbering start falls back to 1 when missing, zero or not a number, and
    /// digits to 3 when missing, not a number or below 1. The find pattern is
    /// compiled here so a bad pattern is reported before any file is touched.
    /// A date format is only checked when the date stamp is enabled.
    pub fn into_rule_config(self) -> Result<RuleConfig, RuleError> {
        let replace = if self.replace.enabled {
            ReplaceRule::new(&self.replace.find, &self.replace.with)?
        } else {
            ReplaceRule::default()
        };

        let start = self
            .numbering
            .start
            .as_ref()
            .and_then(RawNumber::as_i64)
            .filter(|n| *n != 0)
            .unwrap_or(DEFAULT_NUMBER_START);
        let digits = self
            .numbering
            .digits
            .as_ref()
            .and_then(RawNumber::as_i64)
            .filter(|d| *d >= 1)
            .and_then(|d| usize::try_from(d).ok())
            .unwrap_or(DEFAULT_NUMBER_DIGITS);

        let format = match self.date_stamp.format.as_deref() {
            Some(f) if !f.trim().is_empty() => match f.parse::<DateFormat>() {
                Ok(format) => format,
                Err(e) if self.date_stamp.enabled => return Err(e),
                Err(_) => DateFormat::default(),
            },
            _ => DateFormat::default(),
        };

        Ok(RuleConfig {
            replace,
            prefix: self.prefix.into(),
            suffix: self.suffix.into(),
            numbering: NumberingRule {
                enabled: self.numbering.enabled,
                start,
                digits,
            },
            date_stamp: DateStampRule {
                enabled: self.date_stamp.enabled,
                format,
            },
        })
    }
}

impl From<RawText> for TextRule {
    fn from(raw: RawText) -> Self {
        TextRule {
            enabled: raw.enabled,
            text: raw.text,
        }
    }
}
