use crate::domain::fee_schedule::FeeScheduleEntry;
use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::ports::{FeeScheduleDirectory, PaymentStore, StudentDirectory};
use crate::domain::student::{Student, StudentId};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payment records.
///
/// Records are kept in submission order so listings are stable. The version
/// check in `update` happens under the write lock, so concurrent transitions
/// on one record cannot both win.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    inner: Arc<RwLock<PaymentTable>>,
}

#[derive(Default)]
struct PaymentTable {
    order: Vec<PaymentId>,
    records: HashMap<PaymentId, PaymentRecord>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, record: PaymentRecord) -> Result<()> {
        let mut table = self.inner.write().await;
        if table.records.contains_key(&record.id) {
            return Err(LedgerError::validation(format!(
                "payment {} already exists",
                record.id
            )));
        }
        table.order.push(record.id);
        table.records.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: PaymentId) -> Result<Option<PaymentRecord>> {
        let table = self.inner.read().await;
        Ok(table.records.get(&id).cloned())
    }

    async fn update(&self, record: PaymentRecord, expected_version: u64) -> Result<()> {
        let mut table = self.inner.write().await;
        let stored = table
            .records
            .get_mut(&record.id)
            .ok_or_else(|| LedgerError::NotFound(format!("payment {}", record.id)))?;

        if stored.version != expected_version {
            return Err(LedgerError::Conflict {
                payment: record.id,
                expected: expected_version,
                found: stored.version,
            });
        }
        stored.ensure_same_submission(&record)?;
        *stored = record;
        Ok(())
    }

    async fn all(&self) -> Result<Vec<PaymentRecord>> {
        let table = self.inner.read().await;
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.records.get(id).cloned())
            .collect())
    }
}

/// An in-memory student directory, mostly for tests and CSV-fed runs.
#[derive(Default, Clone)]
pub struct InMemoryStudentDirectory {
    students: Arc<RwLock<Vec<Student>>>,
}

impl InMemoryStudentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a student. Fails with `ValidationError` if the id is taken.
    pub async fn insert(&self, student: Student) -> Result<()> {
        let mut students = self.students.write().await;
        if students.iter().any(|s| s.id == student.id) {
            return Err(LedgerError::validation(format!(
                "duplicate student id {}",
                student.id
            )));
        }
        students.push(student);
        Ok(())
    }
}

#[async_trait]
impl StudentDirectory for InMemoryStudentDirectory {
    async fn get(&self, id: &StudentId) -> Result<Option<Student>> {
        let students = self.students.read().await;
        Ok(students.iter().find(|s| &s.id == id).cloned())
    }

    async fn all(&self) -> Result<Vec<Student>> {
        Ok(self.students.read().await.clone())
    }
}

/// An in-memory fee schedule that refuses duplicate keys.
#[derive(Default, Clone)]
pub struct InMemoryFeeSchedule {
    entries: Arc<RwLock<Vec<FeeScheduleEntry>>>,
}

impl InMemoryFeeSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, entry: FeeScheduleEntry) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.key == entry.key) {
            return Err(LedgerError::validation(format!(
                "duplicate fee schedule for {}/{}/{}",
                entry.key.level, entry.key.curriculum, entry.key.academic_year
            )));
        }
        entries.push(entry);
        Ok(())
    }
}

#[async_trait]
impl FeeScheduleDirectory for InMemoryFeeSchedule {
    async fn entries(&self) -> Result<Vec<FeeScheduleEntry>> {
        Ok(self.entries.read().await.clone())
    }
}
