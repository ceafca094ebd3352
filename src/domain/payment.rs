use super::identity::UserId;
use super::money::Amount;
use super::student::StudentId;
use crate::error::LedgerError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(pub Uuid);

impl PaymentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    MobileMoney,
    BankTransfer,
    Cash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Received,
    Confirmed,
    Rejected,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Pending,
        PaymentStatus::Received,
        PaymentStatus::Confirmed,
        PaymentStatus::Rejected,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Confirmed | PaymentStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Received => "received",
            PaymentStatus::Confirmed => "confirmed",
            PaymentStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated payment submission, before the store assigns it an identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub student_id: StudentId,
    pub amount: Amount,
    pub method: PaymentMethod,
    pub payment_date: Option<NaiveDate>,
    pub reference_number: Option<String>,
    pub proof_ref: Option<String>,
    pub notes: Option<String>,
}

/// One submitted fee payment and where it stands in review.
///
/// Only `status`, `confirmed_by`, `confirmed_at`, `rejection_reason` and
/// `version` change after creation, and only through
/// [`apply_transition`](super::lifecycle::apply_transition).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub student_id: StudentId,
    pub amount: Amount,
    pub payment_date: NaiveDate,
    pub method: PaymentMethod,
    pub reference_number: Option<String>,
    pub proof_ref: Option<String>,
    pub status: PaymentStatus,
    pub confirmed_by: Option<UserId>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub submitted_by: UserId,
    pub submitted_at: DateTime<Utc>,
    pub version: u64,
}

impl PaymentRecord {
    /// Creates a pending record. The payment date falls back to the
    /// submission date.
    pub fn new(payment: NewPayment, submitted_by: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: PaymentId::generate(),
            student_id: payment.student_id,
            amount: payment.amount,
            payment_date: payment.payment_date.unwrap_or_else(|| now.date_naive()),
            method: payment.method,
            reference_number: payment.reference_number,
            proof_ref: payment.proof_ref,
            status: PaymentStatus::Pending,
            confirmed_by: None,
            confirmed_at: None,
            rejection_reason: None,
            notes: payment.notes,
            submitted_by,
            submitted_at: now,
            version: 1,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == PaymentStatus::Confirmed
    }

    /// Fails unless `next` differs from this record only in its review
    /// fields: status, confirmation, rejection reason and version.
    pub fn ensure_same_submission(&self, next: &PaymentRecord) -> Result<(), LedgerError> {
        let review_only = PaymentRecord {
            status: self.status,
            confirmed_by: self.confirmed_by.clone(),
            confirmed_at: self.confirmed_at,
            rejection_reason: self.rejection_reason.clone(),
            version: self.version,
            ..next.clone()
        };
        if review_only == *self {
            Ok(())
        } else {
            Err(LedgerError::validation(format!(
                "payment {} submission details cannot change after creation",
                self.id
            )))
        }
    }
}
