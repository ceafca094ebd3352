use crate::domain::identity::Role;
use crate::domain::payment::{PaymentId, PaymentStatus};
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Diagnostic, Debug)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    #[diagnostic(code(feeledger::validation))]
    ValidationError(String),

    #[error("Forbidden: role '{role}' may not {action}")]
    #[diagnostic(code(feeledger::forbidden))]
    Forbidden { role: Role, action: String },

    #[error("Invalid transition: {from} -> {to}")]
    #[diagnostic(
        code(feeledger::invalid_transition),
        help("confirmed and rejected payments are final")
    )]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Not found: {0}")]
    #[diagnostic(code(feeledger::not_found))]
    NotFound(String),

    #[error("Conflict: payment {payment} changed concurrently (expected version {expected}, found {found})")]
    #[diagnostic(
        code(feeledger::conflict),
        help("re-read the payment and retry the transition")
    )]
    Conflict {
        payment: PaymentId,
        expected: u64,
        found: u64,
    },

    #[error("Dependency failure: {0}")]
    #[diagnostic(code(feeledger::dependency))]
    DependencyFailure(String),

    #[error("CSV error: {0}")]
    #[diagnostic(code(feeledger::csv))]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(feeledger::io))]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(feeledger::config))]
    ConfigError(#[from] config::ConfigError),
}

impl LedgerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub(crate) fn dependency(error: impl std::fmt::Display) -> Self {
        Self::DependencyFailure(error.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        Self::dependency(format!("unexpected record shape: {error}"))
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for LedgerError {
    fn from(error: rocksdb::Error) -> Self {
        Self::dependency(format!("RocksDB: {error}"))
    }
}
