use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("batch-renamer").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("BATCH_RENAMER_RULES")
        .env_remove("BATCH_RENAMER_DATE_FORMAT");
    cmd
}

fn create_files(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), name).unwrap();
    }
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_help_flag() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch-rename the files in a folder"));
}

#[test]
fn test_version_flag() {
    bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_target_dir() {
    bin()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_dry_flag_no_filesystem_changes() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["photo.jpg"]);

    bin()
        .args(["--dry", "--prefix", "vac_", "--suffix", "_edit"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PREVIEW"))
        .stdout(predicate::str::contains("vac_photo_edit.jpg"))
        .stdout(predicate::str::contains("Run without --dry"));

    assert_eq!(sorted_names(dir.path()), vec!["photo.jpg"]);
}

#[test]
fn test_dry_plain_output() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["IMG_0001.jpg"]);

    bin()
        .args(["--dry", "--plain", "--find", "IMG_", "--replace-with", ""])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("IMG_0001.jpg\t0001.jpg\n"));
}

#[test]
fn test_apply_renames_files() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["photo.jpg"]);

    bin()
        .args(["--prefix", "vac_", "--suffix", "_edit"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully renamed 1 files"));

    assert_eq!(sorted_names(dir.path()), vec!["vac_photo_edit.jpg"]);
}

#[test]
fn test_numbering_flags() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["img.png"]);

    bin()
        .args(["--start", "5", "--digits", "2"])
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(sorted_names(dir.path()), vec!["img_05.png"]);
}

#[test]
fn test_unparsable_numbers_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["img.png"]);

    bin()
        .args(["--number", "--start", "abc", "--digits", "x"])
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(sorted_names(dir.path()), vec!["img_001.png"]);
}

#[test]
fn test_date_stamp_from_environment_format() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["photo.jpg"]);

    bin()
        .env("BATCH_RENAMER_DATE_FORMAT", "YYYYMMDD")
        .args(["--dry", "--plain"])
        .arg(dir.path())
        .arg("--date")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^photo\.jpg\tphoto_\d{8}\.jpg\n$").unwrap());
}

#[test]
fn test_rules_file() {
    let dir = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    create_files(dir.path(), &["notes.txt"]);

    let rules_path = config_dir.path().join("rules.json");
    std::fs::write(
        &rules_path,
        r#"{ "suffix": { "enabled": true, "text": "_final" } }"#,
    )
    .unwrap();

    bin()
        .arg("--rules")
        .arg(&rules_path)
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(sorted_names(dir.path()), vec!["notes_final.txt"]);
}

#[test]
fn test_invalid_pattern_rejected_before_renaming() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["a(1).txt"]);

    bin()
        .args(["--find", "(1"])
        .arg(dir.path())
        .assert()
        .code(4) // ExitCode::InvalidRule
        .stderr(predicate::str::contains("not valid"));

    assert_eq!(sorted_names(dir.path()), vec!["a(1).txt"]);
}

#[test]
fn test_unknown_date_format() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["a.txt"]);

    bin()
        .arg("--date=YY.MM")
        .arg(dir.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown date format"));
}

#[test]
fn test_conflicting_targets_rejected() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["IMG_1.jpg", "DSC_1.jpg"]);

    bin()
        .args(["--find", "^[A-Z]+_"])
        .arg(dir.path())
        .assert()
        .code(5) // ExitCode::ConflictingTargets
        .stderr(predicate::str::contains("would be produced by"));

    assert_eq!(sorted_names(dir.path()), vec!["DSC_1.jpg", "IMG_1.jpg"]);
}

#[test]
fn test_force_skips_conflict_check() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["IMG_1.jpg", "DSC_1.jpg"]);

    bin()
        .args(["--force", "--find", "^[A-Z]+_"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully renamed 2 files"));

    // Both files were renamed to the same name; the second replaced the first.
    assert_eq!(sorted_names(dir.path()), vec!["1.jpg"]);
}

#[test]
fn test_disabled_date_ignores_bad_environment_format() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["photo.jpg"]);

    bin()
        .env("BATCH_RENAMER_DATE_FORMAT", "YY.MM")
        .args(["--dry", "--plain", "--prefix", "x_"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("photo.jpg\tx_photo.jpg\n"));
}

#[test]
fn test_export_log_json() {
    let dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    create_files(dir.path(), &["photo.jpg"]);
    let log_path = out_dir.path().join("rename-log.json");

    bin()
        .args(["--prefix", "x_", "--export-log"])
        .arg(&log_path)
        .arg(dir.path())
        .assert()
        .success();

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("\"oldName\": \"photo.jpg\""));
    assert!(log.contains("\"newName\": \"x_photo.jpg\""));
}

#[test]
fn test_interactive_apply_and_undo() {
    let dir = tempdir().unwrap();
    create_files(dir.path(), &["a.txt", "b.txt"]);

    bin()
        .args(["--interactive", "--suffix", "_old"])
        .arg(dir.path())
        .write_stdin("preview\napply\nundo\nundo\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("a_old.txt"))
        .stdout(predicate::str::contains("Successfully renamed 2 files"))
        .stdout(predicate::str::contains("Successfully reverted 2 files"))
        .stdout(predicate::str::contains("no rename batch to undo"));

    assert_eq!(sorted_names(dir.path()), vec!["a.txt", "b.txt"]);
}

#[test]
fn test_nonexistent_directory() {
    bin()
        .arg("/nonexistent/path")
        .assert()
        .code(3) // ExitCode::DirectoryNotFound
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_file_instead_of_directory() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("file.txt");
    std::fs::write(&file_path, "content").unwrap();

    bin()
        .arg(&file_path)
        .assert()
        .code(3) // ExitCode::DirectoryNotFound (NotADirectory maps to same code)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_empty_folder() {
    let dir = tempdir().unwrap();

    bin()
        .args(["--prefix", "x"])
        .arg(dir.path())
        .assert()
        .code(1) // ExitCode::GeneralError (NoFiles)
        .stderr(predicate::str::contains("No files found"));
}
