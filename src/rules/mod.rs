mod types;

pub use types::*;

use chrono::{Local, NaiveDate};
use tracing::trace;

/// Split a file name into base and extension.
///
/// The extension runs from the last `.` (inclusive). A name whose only dot
/// is the leading one, like `.gitignore`, has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => name.split_at(pos),
        _ => (name, ""),
    }
}

/// Compute the new name for `original_name` at position `index` of the
/// listing, stamping with today's local date.
pub fn generate_new_name(original_name: &str, index: usize, config: &RuleConfig) -> String {
    generate_new_name_on(original_name, index, config, Local::now().date_naive())
}

/// Same as [`generate_new_name`] with an explicit date for the date stamp.
pub fn generate_new_name_on(
    original_name: &str,
    index: usize,
    config: &RuleConfig,
    today: NaiveDate,
) -> String {
    let (base, extension) = split_extension(original_name);
    let mut name = base.to_string();

    if config.replace.enabled {
        if let Some(pattern) = config.replace.pattern() {
            name = pattern
                .replace_all(&name, config.replace.with.as_str())
                .into_owned();
        }
    }

    if config.prefix.enabled && !config.prefix.text.is_empty() {
        name.insert_str(0, &config.prefix.text);
    }

    if config.suffix.enabled && !config.suffix.text.is_empty() {
        name.push_str(&config.suffix.text);
    }

    if config.numbering.enabled {
        let number = sequence_number(config.numbering.start, index);
        name.push('_');
        name.push_str(&format!(
            "{:0width$}",
            number,
            width = config.numbering.digits
        ));
    }

    if config.date_stamp.enabled {
        name.push('_');
        name.push_str(&today.format(config.date_stamp.format.pattern()).to_string());
    }

    name.push_str(extension);

    trace!(from = %original_name, to = %name, index, "Generated name");

    name
}

fn sequence_number(start: i64, index: usize) -> i64 {
    let offset = i64::try_from(index).unwrap_or(i64::MAX);
    start.saturating_add(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("photo.jpg"), ("photo", ".jpg"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".gitignore"), (".gitignore", ""));
        assert_eq!(split_extension(".config.json"), (".config", ".json"));
        assert_eq!(split_extension("trailing."), ("trailing", "."));
        assert_eq!(split_extension(""), ("", ""));
    }

    #[test]
    fn test_all_rules_disabled_is_identity() {
        let config = RuleConfig::default();
        for name in ["photo.jpg", "README", ".env", "a.b.c", ""] {
            assert_eq!(generate_new_name_on(name, 7, &config, day()), name);
        }
    }

    #[test]
    fn test_disabled_rules_ignore_their_parameters() {
        let config = RuleConfig {
            prefix: TextRule {
                enabled: false,
                text: "nope_".to_string(),
            },
            numbering: NumberingRule {
                enabled: false,
                start: 10,
                digits: 5,
            },
            ..Default::default()
        };
        assert_eq!(generate_new_name_on("a.txt", 0, &config, day()), "a.txt");
    }

    #[test]
    fn test_numbering_sequence() {
        let config = RuleConfig {
            numbering: NumberingRule::new(5, 2),
            ..Default::default()
        };

        let names: Vec<String> = (0..3)
            .map(|i| generate_new_name_on("img.png", i, &config, day()))
            .collect();

        assert_eq!(names, vec!["img_05.png", "img_06.png", "img_07.png"]);
    }

    #[test]
    fn test_numbering_wider_than_digits() {
        let config = RuleConfig {
            numbering: NumberingRule::new(998, 2),
            ..Default::default()
        };
        assert_eq!(generate_new_name_on("a.txt", 3, &config, day()), "a_1001.txt");
    }

    #[test]
    fn test_replace_removes_matches() {
        let config = RuleConfig {
            replace: ReplaceRule::new("IMG_", "").unwrap(),
            ..Default::default()
        };
        assert_eq!(
            generate_new_name_on("IMG_0001.jpg", 0, &config, day()),
            "0001.jpg"
        );
    }

    #[test]
    fn test_replace_is_global_and_case_sensitive() {
        let config = RuleConfig {
            replace: ReplaceRule::new("a", "o").unwrap(),
            ..Default::default()
        };
        assert_eq!(
            generate_new_name_on("banana A.txt", 0, &config, day()),
            "bonono A.txt"
        );
    }

    #[test]
    fn test_replace_uses_regex_syntax() {
        let config = RuleConfig {
            replace: ReplaceRule::new(r"\s+", "-").unwrap(),
            ..Default::default()
        };
        assert_eq!(
            generate_new_name_on("my  holiday pic.jpeg", 0, &config, day()),
            "my-holiday-pic.jpeg"
        );
    }

    #[test]
    fn test_replace_never_touches_extension() {
        let config = RuleConfig {
            replace: ReplaceRule::new("jpg", "png").unwrap(),
            ..Default::default()
        };
        assert_eq!(
            generate_new_name_on("jpg_export.jpg", 0, &config, day()),
            "png_export.jpg"
        );
    }

    #[test]
    fn test_prefix_and_suffix() {
        let config = RuleConfig {
            prefix: TextRule::new("vac_"),
            suffix: TextRule::new("_edit"),
            ..Default::default()
        };
        assert_eq!(
            generate_new_name_on("photo.jpg", 0, &config, day()),
            "vac_photo_edit.jpg"
        );
    }

    #[test]
    fn test_date_formats() {
        let cases = [
            (DateFormat::YearMonthDay, "doc_2026-03-07.pdf"),
            (DateFormat::MonthDayYear, "doc_03-07-2026.pdf"),
            (DateFormat::DayMonthYear, "doc_07-03-2026.pdf"),
            (DateFormat::Compact, "doc_20260307.pdf"),
        ];

        for (format, expected) in cases {
            let config = RuleConfig {
                date_stamp: DateStampRule::new(format),
                ..Default::default()
            };
            assert_eq!(generate_new_name_on("doc.pdf", 0, &config, day()), expected);
        }
    }

    #[test]
    fn test_fixed_rule_order() {
        let config = RuleConfig {
            replace: ReplaceRule::new("raw", "final").unwrap(),
            prefix: TextRule::new("raw_"),
            suffix: TextRule::new("_v"),
            numbering: NumberingRule::new(1, 3),
            date_stamp: DateStampRule::new(DateFormat::Compact),
        };

        // Prefix text is added after replace runs, so it keeps "raw".
        assert_eq!(
            generate_new_name_on("raw.cr2", 1, &config, day()),
            "raw_final_v_002_20260307.cr2"
        );
    }

    #[test]
    fn test_empty_base_is_legal() {
        let config = RuleConfig {
            replace: ReplaceRule::new(".+", "").unwrap(),
            numbering: NumberingRule::new(1, 3),
            ..Default::default()
        };
        assert_eq!(generate_new_name_on("notes.txt", 0, &config, day()), "_001.txt");
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let config = RuleConfig {
            prefix: TextRule::new("x"),
            numbering: NumberingRule::new(3, 4),
            date_stamp: DateStampRule::new(DateFormat::YearMonthDay),
            ..Default::default()
        };
        let first = generate_new_name_on("file.bin", 9, &config, day());
        let second = generate_new_name_on("file.bin", 9, &config, day());
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_new_name_uses_today() {
        let config = RuleConfig {
            date_stamp: DateStampRule::new(DateFormat::YearMonthDay),
            ..Default::default()
        };
        let name = generate_new_name("a.txt", 0, &config);
        let stamp = &name["a_".len()..name.len() - ".txt".len()];
        assert!(NaiveDate::parse_from_str(stamp, "%Y-%m-%d").is_ok());
        assert!(name.ends_with(".txt"));
    }
}
