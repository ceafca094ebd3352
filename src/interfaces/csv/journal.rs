use super::journal_reader::JournalEntry;
use crate::application::engine::{FeeEngine, SubmitPayment};
use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::student::StudentId;
use crate::error::{LedgerError, Result};
use std::collections::HashMap;

/// Replays journal entries against an engine.
///
/// Keeps the labels given to submitted payments so later lines in the same
/// run can refer to them.
#[derive(Debug, Default)]
pub struct JournalSession {
    labels: HashMap<String, PaymentId>,
}

impl JournalSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn apply(&mut self, engine: &FeeEngine, entry: JournalEntry) -> Result<PaymentRecord> {
        let actor = entry.actor();

        let Some(target) = entry.action.target() else {
            if entry.payment.is_empty() || self.labels.contains_key(&entry.payment) {
                return Err(LedgerError::validation(format!(
                    "payment label '{}' is empty or already used",
                    entry.payment
                )));
            }

            let request = SubmitPayment {
                student_id: StudentId(entry.require(&entry.student, "student")?.clone()),
                amount: *entry.require(&entry.amount, "amount")?,
                method: *entry.require(&entry.method, "method")?,
                payment_date: entry.date,
                reference_number: entry.reference.clone(),
                proof_ref: entry.proof.clone(),
                notes: entry.notes.clone(),
            };
            let record = engine.submit_payment(&actor, request).await?;
            self.labels.insert(entry.payment, record.id);
            return Ok(record);
        };

        let payment_id = self.resolve(&entry.payment)?;
        engine
            .transition_payment(payment_id, target, &actor, entry.reason.as_deref())
            .await
    }

    fn resolve(&self, label: &str) -> Result<PaymentId> {
        if let Some(id) = self.labels.get(label) {
            return Ok(*id);
        }
        label
            .parse()
            .map_err(|_| LedgerError::NotFound(format!("payment {label}")))
    }
}
