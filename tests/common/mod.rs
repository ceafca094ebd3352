#![allow(dead_code)]

use feeledger::application::engine::FeeEngine;
use feeledger::domain::fee_schedule::{FeeScheduleEntry, ScheduleKey};
use feeledger::domain::identity::{Actor, Role};
use feeledger::domain::student::{ClassAssignment, ClassId, Student};
use feeledger::infrastructure::in_memory::{
    InMemoryFeeSchedule, InMemoryPaymentStore, InMemoryStudentDirectory,
};
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;

pub const JOURNAL_HEADER: &str =
    "action, payment, student, amount, method, date, reference, proof, notes, actor, role, reason";

pub fn guardian() -> Actor {
    Actor::new("guardian-1", Role::Guardian)
}

pub fn staff() -> Actor {
    Actor::new("staff-1", Role::Staff)
}

pub fn admin() -> Actor {
    Actor::new("admin-1", Role::Admin)
}

pub fn class(id: &str, level: &str) -> ClassAssignment {
    ClassAssignment {
        class_id: ClassId::from(id),
        level: level.to_string(),
        curriculum: "cbc".to_string(),
        academic_year: "2025".to_string(),
    }
}

/// S1 and S2 in 1A (50000), S3 in 2A (60000), S4 unassigned.
pub async fn cohort_engine() -> FeeEngine {
    let students = InMemoryStudentDirectory::new();
    for student in [
        Student::new("S1")
            .with_class(class("1A", "grade-1"))
            .with_guardian("guardian-1"),
        Student::new("S2")
            .with_class(class("1A", "grade-1"))
            .with_guardian("guardian-2"),
        Student::new("S3")
            .with_class(class("2A", "grade-2"))
            .with_guardian("guardian-1"),
        Student::new("S4"),
    ] {
        students.insert(student).await.unwrap();
    }

    let fees = InMemoryFeeSchedule::new();
    for (level, fee) in [("grade-1", dec!(50000)), ("grade-2", dec!(60000))] {
        fees.insert(FeeScheduleEntry::new(ScheduleKey::new(level, "cbc", "2025"), fee).unwrap())
            .await
            .unwrap();
    }

    FeeEngine::new(
        Box::new(InMemoryPaymentStore::new()),
        Box::new(students),
        Box::new(fees),
    )
}

pub fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

pub fn students_csv() -> NamedTempFile {
    csv_file(&[
        "id, name, class, level, curriculum, academic_year, guardians",
        "S1, Amani, 1A, grade-1, cbc, 2025, guardian-1",
        "S2, Baraka, 1A, grade-1, cbc, 2025, guardian-2",
        "S3, Chausiku, 2A, grade-2, cbc, 2025, guardian-1",
    ])
}

pub fn fees_csv() -> NamedTempFile {
    csv_file(&[
        "level, curriculum, academic_year, total_fee",
        "grade-1, cbc, 2025, 50000",
        "grade-2, cbc, 2025, 60000",
    ])
}

pub fn journal_csv(entries: &[&str]) -> NamedTempFile {
    let mut lines = vec![JOURNAL_HEADER];
    lines.extend_from_slice(entries);
    csv_file(&lines)
}
