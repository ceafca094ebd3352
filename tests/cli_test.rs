use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;
use common::{fees_csv, journal_csv, students_csv};

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let students = students_csv();
    let fees = fees_csv();
    let journal = journal_csv(&[
        "submit, p1, S1, 20000, mobile-money, 2025-01-10, QK7H2J9, proofs/p1.jpg, , guardian-1, guardian, ",
        "submit, p2, S1, 20000, mobile-money, 2025-01-11, QK7H2J9, , , guardian-1, guardian, ",
        "receive, p1, , , , , , , , staff-1, staff, ",
        "confirm, p1, , , , , , , , admin-1, admin, ",
        "reject, p2, , , , , , , , admin-1, admin, duplicate",
        "submit, p3, S3, 70000, cash, , , , , staff-1, staff, ",
        "confirm, p3, , , , , , , , admin-1, admin, ",
    ]);

    let mut cmd = Command::new(cargo_bin!("feeledger"));
    cmd.arg(journal.path())
        .arg("--students")
        .arg(students.path())
        .arg("--fees")
        .arg(fees.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "student,class,total_fee,total_paid,balance",
        ))
        .stdout(predicate::str::contains("S1,1A,50000,20000,30000"))
        .stdout(predicate::str::contains("S2,1A,50000,0,50000"))
        .stdout(predicate::str::contains("S3,2A,60000,70000,-10000"));

    Ok(())
}

#[test]
fn test_cli_rollup() {
    let students = students_csv();
    let fees = fees_csv();
    let journal = journal_csv(&[
        "submit, p1, S1, 20000, cash, , , , , guardian-1, guardian, ",
        "confirm, p1, , , , , , , , admin-1, admin, ",
        "submit, p2, S3, 70000, cash, , , , , staff-1, staff, ",
        "confirm, p2, , , , , , , , admin-1, admin, ",
    ]);

    let mut cmd = Command::new(cargo_bin!("feeledger"));
    cmd.arg(journal.path())
        .arg("--students")
        .arg(students.path())
        .arg("--fees")
        .arg(fees.path())
        .arg("--rollup");

    // Expected 160000, collected 90000, outstanding 30000 + 50000 (S3's credit ignored)
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "students,total_expected,total_collected,total_outstanding,collection_rate_percent",
        ))
        .stdout(predicate::str::contains("3,160000,90000,80000,56"));
}

#[test]
fn test_cli_filters() {
    let students = students_csv();
    let fees = fees_csv();
    let journal = journal_csv(&[]);

    let mut cmd = Command::new(cargo_bin!("feeledger"));
    cmd.arg(journal.path())
        .arg("--students")
        .arg(students.path())
        .arg("--fees")
        .arg(fees.path())
        .arg("--class")
        .arg("1A");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("S1,1A"))
        .stdout(predicate::str::contains("S2,1A"))
        .stdout(predicate::str::contains("S3").not());

    let mut cmd = Command::new(cargo_bin!("feeledger"));
    cmd.arg(journal.path())
        .arg("--students")
        .arg(students.path())
        .arg("--fees")
        .arg(fees.path())
        .arg("--student")
        .arg("S3");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("S3,2A,60000,0,60000"))
        .stdout(predicate::str::contains("S1").not());
}

#[test]
fn test_cli_duplicate_fee_schedule_aborts() {
    let students = students_csv();
    let fees = common::csv_file(&[
        "level, curriculum, academic_year, total_fee",
        "grade-1, cbc, 2025, 50000",
        "grade-1, cbc, 2025, 55000",
    ]);
    let journal = journal_csv(&[]);

    let mut cmd = Command::new(cargo_bin!("feeledger"));
    cmd.arg(journal.path())
        .arg("--students")
        .arg(students.path())
        .arg("--fees")
        .arg(fees.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("duplicate fee schedule"));
}

#[test]
fn test_cli_duplicate_student_id_aborts() {
    let students = common::csv_file(&[
        "id, name, class, level, curriculum, academic_year, guardians",
        "S1, Amani, 1A, grade-1, cbc, 2025, guardian-1",
        "S1, Amani Juma, 2A, grade-2, cbc, 2025, guardian-9",
    ]);
    let fees = fees_csv();
    let journal = journal_csv(&[]);

    let mut cmd = Command::new(cargo_bin!("feeledger"));
    cmd.arg(journal.path())
        .arg("--students")
        .arg(students.path())
        .arg("--fees")
        .arg(fees.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("duplicate student id S1"))
        .stdout(predicate::str::is_empty());
}
