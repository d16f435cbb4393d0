#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const CENTRES_CSV: &str = "\
centre_code,centre_name,city,device_allotted
101,Alpha Hall,Pune,40
102,Gamma Centre,Nashik,25
";

fn cli() -> Command {
    Command::cargo_bin("mockroster-cli").unwrap()
}

#[test]
fn generate_writes_csv_and_prints_rolls() {
    let dir = tempdir().unwrap();
    let centres = dir.path().join("centres.csv");
    fs::write(&centres, CENTRES_CSV).unwrap();
    let out = dir.path().join("roster.csv");

    cli()
        .current_dir(dir.path())
        .args(["generate", "--centres"])
        .arg(&centres)
        .args(["--date", "2025-01-01", "--shifts", "Training 1, Mock 1", "--roll-length", "3"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("20 row(s), 20 new"))
        .stdout(predicate::str::contains("Demo Name5  005"));

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 21);
    assert!(text.contains("005,Demo Name5,102,Gamma Centre,Nashik,25,02 Jan'25,Mock 1"));
}

#[test]
fn append_mode_extends_previous_output() {
    let dir = tempdir().unwrap();
    let centres = dir.path().join("centres.csv");
    fs::write(&centres, CENTRES_CSV).unwrap();
    let out = dir.path().join("roster.csv");

    for (shift, mode) in [("Mock 1", "fresh"), ("Mock 2", "append")] {
        cli()
            .args(["generate", "--preview", "0", "--centres"])
            .arg(&centres)
            .args(["--date", "2025-02-01", "--shifts", shift, "--mode", mode])
            .arg("--out")
            .arg(&out)
            .assert()
            .success();
    }

    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + 10 + 10);
    assert!(lines[1].ends_with("Mock 1"));
    assert!(lines[20].ends_with("Mock 2"));
}

#[test]
fn blank_shifts_exit_with_missing_input() {
    let dir = tempdir().unwrap();
    let centres = dir.path().join("centres.csv");
    fs::write(&centres, CENTRES_CSV).unwrap();
    let out = dir.path().join("roster.csv");

    cli()
        .args(["generate", "--centres"])
        .arg(&centres)
        .args(["--date", "2025-01-01", "--shifts", " , ,"])
        .arg("--out")
        .arg(&out)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least one shift"));
    assert!(!out.exists());
}

#[test]
fn missing_columns_exit_with_schema_error() {
    let dir = tempdir().unwrap();
    let centres = dir.path().join("centres.csv");
    fs::write(&centres, "centre_code,centre_name\n1,A\n").unwrap();
    let out = dir.path().join("roster.csv");

    cli()
        .args(["generate", "--centres"])
        .arg(&centres)
        .args(["--date", "2025-01-01", "--shifts", "A"])
        .arg("--out")
        .arg(&out)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("city, device_allotted"));
    assert!(!out.exists());
}

#[test]
fn missing_centre_file_exit_with_source_unavailable() {
    let dir = tempdir().unwrap();
    cli()
        .current_dir(dir.path())
        .args(["check", "--centres", "absent.xlsx"])
        .assert()
        .code(4);
}

#[test]
fn roll_numbers_command() {
    cli()
        .args(["roll-numbers", "--roll-length", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo Name1  0001"))
        .stdout(predicate::str::contains("Demo Name5  0005"));
}

#[test]
fn zero_roll_length_rejected_by_parser() {
    cli()
        .args(["roll-numbers", "--roll-length", "0"])
        .assert()
        .failure();
}

#[test]
fn profile_drives_generation() {
    let dir = tempdir().unwrap();
    let centres = dir.path().join("centres.csv");
    fs::write(&centres, CENTRES_CSV).unwrap();
    let profiles = dir.path().join("profiles");
    let out = dir.path().join("from-profile.csv");

    cli()
        .arg("--profiles-dir")
        .arg(&profiles)
        .args(["profile", "save", "--id", "weekly", "--name", "Weekly mocks"])
        .args(["--date", "2025-05-05", "--shifts", "Mock 1,Mock 2,Mock 3"])
        .arg("--centres")
        .arg(&centres)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    cli()
        .arg("--profiles-dir")
        .arg(&profiles)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weekly | Weekly mocks | 3 shift(s)"));

    cli()
        .arg("--profiles-dir")
        .arg(&profiles)
        .args(["generate", "--profile", "weekly", "--preview", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30 row(s), 30 new"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("00001,Demo Name1,101,Alpha Hall,Pune,40,07 May'25,Mock 3"));
}

#[test]
fn ods_output_name_is_written_as_xlsx_and_appendable() {
    let dir = tempdir().unwrap();
    let centres = dir.path().join("centres.csv");
    fs::write(&centres, CENTRES_CSV).unwrap();

    for (shift, mode) in [("Mock 1", "fresh"), ("Mock 2", "append")] {
        cli()
            .current_dir(dir.path())
            .args(["generate", "--preview", "0", "--centres"])
            .arg(&centres)
            .args(["--date", "2025-02-01", "--shifts", shift, "--mode", mode])
            .args(["--out", "r.ods"])
            .assert()
            .success()
            .stdout(predicate::str::contains("r.ods.xlsx"));
    }

    assert!(!dir.path().join("r.ods").exists());
    let rows = mockroster::io::import_existing_roster(dir.path().join("r.ods.xlsx")).unwrap();
    assert_eq!(rows.len(), 20);
    assert_eq!(rows.rows[19].shift, "Mock 2");
}
