use crate::domain::ledger::{BalanceSnapshot, Rollup};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct SnapshotRow<'a> {
    student: &'a str,
    class: Option<&'a str>,
    total_fee: Decimal,
    total_paid: Decimal,
    balance: Decimal,
}

#[derive(Serialize)]
struct RollupRow {
    students: usize,
    total_expected: Decimal,
    total_collected: Decimal,
    total_outstanding: Decimal,
    collection_rate_percent: Decimal,
}

/// Writes ledger output as CSV with normalized decimals (`30000`, not `30000.00`).
pub struct BalanceWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> BalanceWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes `student,class,total_fee,total_paid,balance`, one row per snapshot.
    pub fn write_snapshots(&mut self, snapshots: &[BalanceSnapshot]) -> Result<()> {
        if snapshots.is_empty() {
            self.writer
                .write_record(["student", "class", "total_fee", "total_paid", "balance"])?;
        }
        for snapshot in snapshots {
            self.writer.serialize(SnapshotRow {
                student: &snapshot.student_id.0,
                class: snapshot.class_id.as_ref().map(|c| c.0.as_str()),
                total_fee: snapshot.total_fee.value().normalize(),
                total_paid: snapshot.total_paid.value().normalize(),
                balance: snapshot.balance.value().normalize(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_rollup(&mut self, rollup: &Rollup) -> Result<()> {
        self.writer.serialize(RollupRow {
            students: rollup.students,
            total_expected: rollup.total_expected.value().normalize(),
            total_collected: rollup.total_collected.value().normalize(),
            total_outstanding: rollup.total_outstanding.value().normalize(),
            collection_rate_percent: rollup.collection_rate_percent.normalize(),
        })?;
        self.writer.flush()?;
        Ok(())
    }
}
