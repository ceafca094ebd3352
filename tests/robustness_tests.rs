use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;
use common::{fees_csv, journal_csv, students_csv};

#[test]
fn test_malformed_journal_handling() {
    let students = students_csv();
    let fees = fees_csv();
    let journal = journal_csv(&[
        // Valid payment
        "submit, p1, S1, 1000, cash, , , , , guardian-1, guardian, ",
        "confirm, p1, , , , , , , , admin-1, admin, ",
        // Unknown action
        "refund, p1, , , , , , , , admin-1, admin, ",
        // Amount is not a number
        "submit, p2, S1, lots, cash, , , , , guardian-1, guardian, ",
        // Unknown method
        "submit, p3, S1, 10, cheque, , , , , guardian-1, guardian, ",
        // Valid payment again
        "submit, p4, S1, 2000, bank-transfer, , , , , guardian-1, guardian, ",
        "confirm, p4, , , , , , , , admin-1, admin, ",
    ]);

    let mut cmd = Command::new(cargo_bin!("feeledger"));
    cmd.arg(journal.path())
        .arg("--students")
        .arg(students.path())
        .arg("--fees")
        .arg(fees.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading journal entry"))
        .stdout(predicate::str::contains("S1,1A,50000,3000,47000"));
}

#[test]
fn test_refused_entries_are_skipped() {
    let students = students_csv();
    let fees = fees_csv();
    let journal = journal_csv(&[
        // Zero amount
        "submit, p1, S1, 0, cash, , , , , guardian-1, guardian, ",
        // Guardian paying for someone else's child
        "submit, p2, S2, 500, cash, , , , , guardian-1, guardian, ",
        "submit, p3, S1, 500, cash, , , , , guardian-1, guardian, ",
        // Staff may not confirm
        "confirm, p3, , , , , , , , staff-1, staff, ",
        // Rejection needs a reason
        "reject, p3, , , , , , , , admin-1, admin, ",
        "confirm, p3, , , , , , , , admin-1, admin, ",
        // Final
        "reject, p3, , , , , , , , admin-1, admin, too late",
        // Unknown payment
        "confirm, p9, , , , , , , , admin-1, admin, ",
    ]);

    let mut cmd = Command::new(cargo_bin!("feeledger"));
    cmd.arg(journal.path())
        .arg("--students")
        .arg(students.path())
        .arg("--fees")
        .arg(fees.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error processing journal entry"))
        .stderr(predicate::str::contains("Validation error"))
        .stderr(predicate::str::contains("Forbidden"))
        .stderr(predicate::str::contains("Invalid transition: confirmed -> rejected"))
        .stderr(predicate::str::contains("Not found: payment p9"))
        .stdout(predicate::str::contains("S1,1A,50000,500,49500"))
        .stdout(predicate::str::contains("S2,1A,50000,0,50000"));
}
