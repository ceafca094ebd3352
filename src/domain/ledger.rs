//! Balance ledger: expected fees against confirmed payments.
//!
//! Everything here is a pure function of the students, payments and fee
//! schedule handed in. Nothing is cached; callers recompute after every
//! mutation they care about.

use super::fee_schedule::{self, FeeScheduleEntry};
use super::money::Balance;
use super::payment::PaymentRecord;
use super::student::{ClassId, Student, StudentId};
use crate::error::{LedgerError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashMap;

/// Narrows a ledger computation to one student and/or one class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceFilter {
    pub student: Option<StudentId>,
    pub class: Option<ClassId>,
}

impl BalanceFilter {
    pub fn student(id: impl Into<String>) -> Self {
        Self {
            student: Some(StudentId(id.into())),
            class: None,
        }
    }

    pub fn class(id: impl Into<String>) -> Self {
        Self {
            student: None,
            class: Some(ClassId(id.into())),
        }
    }

    fn matches(&self, student: &Student) -> bool {
        let student_ok = self.student.as_ref().is_none_or(|id| &student.id == id);
        let class_ok = self
            .class
            .as_ref()
            .is_none_or(|class| student.class_id() == Some(class));
        student_ok && class_ok
    }
}

/// One student's fee position at the time of computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSnapshot {
    pub student_id: StudentId,
    pub class_id: Option<ClassId>,
    pub total_fee: Balance,
    pub total_paid: Balance,
    pub balance: Balance,
}

/// Cohort totals over a set of snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rollup {
    pub students: usize,
    pub total_expected: Balance,
    pub total_collected: Balance,
    pub total_outstanding: Balance,
    pub collection_rate_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    pub snapshots: Vec<BalanceSnapshot>,
    pub rollup: Rollup,
}

/// Computes one snapshot per student selected by `filter`, ordered by
/// student id, plus their rollup.
///
/// Only confirmed payments count as paid. Students without a class, or whose
/// class has no fee schedule, are expected to pay nothing.
///
/// Fails with `ValidationError` when a total leaves the `Decimal` range.
pub fn compute(
    students: &[Student],
    payments: &[PaymentRecord],
    schedule: &[FeeScheduleEntry],
    filter: &BalanceFilter,
) -> Result<BalanceReport> {
    let mut paid: HashMap<&StudentId, Balance> = HashMap::new();
    for payment in payments.iter().filter(|p| p.is_confirmed()) {
        let total = paid.entry(&payment.student_id).or_default();
        *total = total.checked_add(payment.amount.into())?;
    }

    let mut snapshots = students
        .iter()
        .filter(|student| filter.matches(student))
        .map(|student| -> Result<BalanceSnapshot> {
            let total_fee = student
                .class
                .as_ref()
                .and_then(|class| fee_schedule::lookup(schedule, &class.schedule_key()))
                .map(|entry| entry.total_fee)
                .unwrap_or(Balance::ZERO);
            let total_paid = paid.get(&student.id).copied().unwrap_or(Balance::ZERO);

            Ok(BalanceSnapshot {
                student_id: student.id.clone(),
                class_id: student.class_id().cloned(),
                total_fee,
                total_paid,
                balance: total_fee.checked_sub(total_paid)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    snapshots.sort_by(|a, b| a.student_id.cmp(&b.student_id));

    let rollup = rollup(&snapshots)?;
    Ok(BalanceReport { snapshots, rollup })
}

/// Aggregates snapshots. A student's overpayment never offsets another
/// student's debt.
pub fn rollup(snapshots: &[BalanceSnapshot]) -> Result<Rollup> {
    let total_expected = Balance::total(snapshots.iter().map(|s| s.total_fee))?;
    let total_collected = Balance::total(snapshots.iter().map(|s| s.total_paid))?;
    let total_outstanding = Balance::total(snapshots.iter().map(|s| s.balance.owed()))?;

    Ok(Rollup {
        students: snapshots.len(),
        total_expected,
        total_collected,
        total_outstanding,
        collection_rate_percent: collection_rate(total_collected, total_expected)?,
    })
}

/// `round(100 * collected / expected)`, or zero when nothing is expected.
///
/// Divides before scaling so large but representable totals still yield a rate.
pub fn collection_rate(collected: Balance, expected: Balance) -> Result<Decimal> {
    if expected.value().is_zero() {
        return Ok(Decimal::ZERO);
    }
    collected
        .value()
        .checked_div(expected.value())
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(|rate| rate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| {
            LedgerError::validation(format!(
                "collection rate of {} over {} is out of range",
                collected.value(),
                expected.value()
            ))
        })
}
