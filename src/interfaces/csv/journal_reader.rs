use crate::domain::identity::{Actor, Role, UserId};
use crate::domain::payment::{PaymentMethod, PaymentStatus};
use crate::error::{LedgerError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum JournalAction {
    Submit,
    Receive,
    Confirm,
    Reject,
}

impl JournalAction {
    /// The status a transition entry moves its payment to.
    pub fn target(&self) -> Option<PaymentStatus> {
        match self {
            JournalAction::Submit => None,
            JournalAction::Receive => Some(PaymentStatus::Received),
            JournalAction::Confirm => Some(PaymentStatus::Confirmed),
            JournalAction::Reject => Some(PaymentStatus::Rejected),
        }
    }
}

/// One journal line:
/// `action,payment,student,amount,method,date,reference,proof,notes,actor,role,reason`.
///
/// `payment` is a label chosen by the submitter; transitions may use the
/// label or the generated payment id.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct JournalEntry {
    pub action: JournalAction,
    pub payment: String,
    pub student: Option<String>,
    pub amount: Option<Decimal>,
    pub method: Option<PaymentMethod>,
    pub date: Option<NaiveDate>,
    pub reference: Option<String>,
    pub proof: Option<String>,
    pub notes: Option<String>,
    pub actor: String,
    pub role: Role,
    pub reason: Option<String>,
}

impl JournalEntry {
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: UserId(self.actor.clone()),
            role: self.role,
        }
    }

    pub(crate) fn require<'a, T>(&self, field: &'a Option<T>, name: &str) -> Result<&'a T> {
        field.as_ref().ok_or_else(|| {
            LedgerError::validation(format!("submit entry '{}' is missing {name}", self.payment))
        })
    }
}

/// Reads journal entries from a CSV source.
///
/// Entries are deserialized lazily, so a malformed line only fails its own
/// item and the caller decides whether to carry on.
pub struct JournalReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> JournalReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: super::reader_builder().from_reader(source),
        }
    }

    pub fn entries(self) -> impl Iterator<Item = Result<JournalEntry>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}
