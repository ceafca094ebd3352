use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::ports::PaymentStore;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family holding payment records, keyed by payment id.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent payment store backed by RocksDB.
///
/// Records are stored as JSON. RocksDB has no compare-and-set, so inserts and
/// versioned updates are serialized through an in-process write lock; only one
/// process may open the database at a time anyway.
///
/// `Clone` shares the underlying `Arc<DB>` and the write lock.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at `path` with the payments
    /// column family.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn payments(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_PAYMENTS)
            .ok_or_else(|| LedgerError::dependency("payments column family not found"))
    }

    fn read(&self, id: PaymentId) -> Result<Option<PaymentRecord>> {
        let cf = self.payments()?;
        match self.db.get_pinned_cf(cf, id.0.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write(&self, record: &PaymentRecord) -> Result<()> {
        let cf = self.payments()?;
        let value = serde_json::to_vec(record)?;
        self.db.put_cf(cf, record.id.0.as_bytes(), value)?;
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn insert(&self, record: PaymentRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        if self.read(record.id)?.is_some() {
            return Err(LedgerError::validation(format!(
                "payment {} already exists",
                record.id
            )));
        }
        self.write(&record)
    }

    async fn get(&self, id: PaymentId) -> Result<Option<PaymentRecord>> {
        self.read(id)
    }

    async fn update(&self, record: PaymentRecord, expected_version: u64) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let stored = self
            .read(record.id)?
            .ok_or_else(|| LedgerError::NotFound(format!("payment {}", record.id)))?;

        if stored.version != expected_version {
            return Err(LedgerError::Conflict {
                payment: record.id,
                expected: expected_version,
                found: stored.version,
            });
        }
        stored.ensure_same_submission(&record)?;
        self.write(&record)
    }

    async fn all(&self) -> Result<Vec<PaymentRecord>> {
        let cf = self.payments()?;
        let mut records = Vec::new();

        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            let record: PaymentRecord = serde_json::from_slice(&value)?;
            records.push(record);
        }

        records.sort_by_key(|record| record.submitted_at);
        Ok(records)
    }
}
