use super::fee_schedule::{self, FeeScheduleEntry, ScheduleKey};
use super::payment::{PaymentId, PaymentRecord};
use super::student::{Student, StudentId};
use crate::error::Result;
use async_trait::async_trait;

/// Where payment records live.
///
/// Records are only ever inserted or replaced; the store never deletes.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Inserts a new record. Fails with `ValidationError` if the id exists.
    async fn insert(&self, record: PaymentRecord) -> Result<()>;

    async fn get(&self, id: PaymentId) -> Result<Option<PaymentRecord>>;

    /// Replaces a record if the stored version is still `expected_version`,
    /// otherwise fails with `Conflict` and keeps the stored record.
    ///
    /// Only review fields may differ from the stored record; a changed
    /// submission detail fails with `ValidationError`.
    async fn update(&self, record: PaymentRecord, expected_version: u64) -> Result<()>;

    async fn all(&self) -> Result<Vec<PaymentRecord>>;

    async fn for_student(&self, student_id: &StudentId) -> Result<Vec<PaymentRecord>> {
        let mut records = self.all().await?;
        records.retain(|record| &record.student_id == student_id);
        Ok(records)
    }
}

/// Read access to the school's student records.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    async fn get(&self, id: &StudentId) -> Result<Option<Student>>;
    async fn all(&self) -> Result<Vec<Student>>;
}

/// Read access to configured fee schedules.
#[async_trait]
pub trait FeeScheduleDirectory: Send + Sync {
    async fn entries(&self) -> Result<Vec<FeeScheduleEntry>>;

    async fn find(&self, key: &ScheduleKey) -> Result<Option<FeeScheduleEntry>> {
        let entries = self.entries().await?;
        Ok(fee_schedule::lookup(&entries, key).cloned())
    }
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type StudentDirectoryBox = Box<dyn StudentDirectory>;
pub type FeeScheduleDirectoryBox = Box<dyn FeeScheduleDirectory>;

pub type PaymentStoreFactory = Box<dyn Fn() -> PaymentStoreBox + Send + Sync>;
