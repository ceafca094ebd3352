#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

mod common;
use common::{fees_csv, journal_csv, students_csv};

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");
    let students = students_csv();
    let fees = fees_csv();

    // 1. First run: confirm a payment
    let journal1 = journal_csv(&[
        "submit, p1, S1, 20000, cash, , , , , guardian-1, guardian, ",
        "confirm, p1, , , , , , , , admin-1, admin, ",
    ]);
    let output1 = Command::new(cargo_bin!("feeledger"))
        .arg(journal1.path())
        .arg("--students")
        .arg(students.path())
        .arg("--fees")
        .arg(fees.path())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("S1,1A,50000,20000,30000"));

    // 2. Second run: labels are per run, payments are not
    let journal2 = journal_csv(&[
        "submit, p1, S1, 10000, cash, , , , , guardian-1, guardian, ",
        "confirm, p1, , , , , , , , admin-1, admin, ",
    ]);
    let output2 = Command::new(cargo_bin!("feeledger"))
        .arg(journal2.path())
        .arg("--students")
        .arg(students.path())
        .arg("--fees")
        .arg(fees.path())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    // Should have recovered 20000 and added 10000
    assert!(stdout2.contains("S1,1A,50000,30000,20000"));
}
