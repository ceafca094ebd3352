use crate::domain::fee_schedule::{FeeScheduleEntry, ScheduleKey};
use crate::domain::identity::UserId;
use crate::domain::student::{ClassAssignment, ClassId, Student, StudentId};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One line of a student export: `id,name,class,level,curriculum,academic_year,guardians`.
#[derive(Debug, Deserialize)]
struct StudentRow {
    id: String,
    name: Option<String>,
    class: Option<String>,
    level: Option<String>,
    curriculum: Option<String>,
    academic_year: Option<String>,
    guardians: Option<String>,
}

fn to_student(row: StudentRow) -> Result<Student> {
    let class = match (row.class, row.level, row.curriculum, row.academic_year) {
        (None, None, None, None) => None,
        (Some(class_id), Some(level), Some(curriculum), Some(academic_year)) => {
            Some(ClassAssignment {
                class_id: ClassId(class_id),
                level,
                curriculum,
                academic_year,
            })
        }
        _ => {
            return Err(LedgerError::validation(format!(
                "student {} has an incomplete class assignment",
                row.id
            )));
        }
    };

    let guardians = row
        .guardians
        .as_deref()
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(|g| UserId(g.to_string()))
        .collect();

    Ok(Student {
        id: StudentId(row.id),
        name: row.name,
        class,
        guardians,
    })
}

/// One line of a fee schedule export: `level,curriculum,academic_year,total_fee`.
#[derive(Debug, Deserialize)]
struct FeeRow {
    level: String,
    curriculum: String,
    academic_year: String,
    total_fee: Decimal,
}

/// Reads every student from a CSV source, failing on the first bad row.
pub fn read_students<R: Read>(source: R) -> Result<Vec<Student>> {
    super::reader_builder()
        .from_reader(source)
        .into_deserialize::<StudentRow>()
        .map(|row| to_student(row?))
        .collect()
}

/// Reads every fee schedule entry from a CSV source, failing on the first bad row.
pub fn read_fee_schedule<R: Read>(source: R) -> Result<Vec<FeeScheduleEntry>> {
    super::reader_builder()
        .from_reader(source)
        .into_deserialize::<FeeRow>()
        .map(|row| {
            let row = row?;
            FeeScheduleEntry::new(
                ScheduleKey::new(row.level, row.curriculum, row.academic_year),
                row.total_fee,
            )
        })
        .collect()
}
