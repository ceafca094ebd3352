use crate::domain::identity::Actor;
use crate::domain::ledger::{self, BalanceFilter, BalanceReport};
use crate::domain::lifecycle;
use crate::domain::money::Amount;
use crate::domain::payment::{NewPayment, PaymentId, PaymentMethod, PaymentRecord, PaymentStatus};
use crate::domain::ports::{FeeScheduleDirectoryBox, PaymentStoreBox, StudentDirectoryBox};
use crate::domain::student::StudentId;
use crate::error::{LedgerError, Result};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// A payment as submitted by a guardian or recorded at the office.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitPayment {
    pub student_id: StudentId,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub payment_date: Option<NaiveDate>,
    pub reference_number: Option<String>,
    pub proof_ref: Option<String>,
    pub notes: Option<String>,
}

impl SubmitPayment {
    pub fn new(student_id: impl Into<String>, amount: Decimal, method: PaymentMethod) -> Self {
        Self {
            student_id: StudentId(student_id.into()),
            amount,
            method,
            payment_date: None,
            reference_number: None,
            proof_ref: None,
            notes: None,
        }
    }
}

/// The fee payment reconciliation engine.
///
/// `FeeEngine` owns no state of its own: every operation reads from and
/// writes to the injected collaborators, so the ledger it reports always
/// reflects whatever the payment store last committed.
pub struct FeeEngine {
    payments: PaymentStoreBox,
    students: StudentDirectoryBox,
    fee_schedule: FeeScheduleDirectoryBox,
}

impl FeeEngine {
    /// Creates a new `FeeEngine` over the given collaborators.
    ///
    /// # Arguments
    ///
    /// * `payments` - The store for payment records.
    /// * `students` - The student directory used to resolve payers and classes.
    /// * `fee_schedule` - The directory of configured fees.
    pub fn new(
        payments: PaymentStoreBox,
        students: StudentDirectoryBox,
        fee_schedule: FeeScheduleDirectoryBox,
    ) -> Self {
        Self {
            payments,
            students,
            fee_schedule,
        }
    }

    /// Records a new payment in `pending` status.
    ///
    /// Fails with `ValidationError` when the amount is not positive or the
    /// student is unknown, and with `Forbidden` when a guardian pays for a
    /// student they are not linked to. Nothing is stored on failure.
    pub async fn submit_payment(&self, actor: &Actor, request: SubmitPayment) -> Result<PaymentRecord> {
        let amount = Amount::new(request.amount)?;

        let student = self
            .students
            .get(&request.student_id)
            .await?
            .ok_or_else(|| {
                LedgerError::validation(format!("unknown student {}", request.student_id))
            })?;
        lifecycle::authorize_submission(actor, &student)?;

        let payment = NewPayment {
            student_id: student.id,
            amount,
            method: request.method,
            payment_date: request.payment_date,
            reference_number: clean(request.reference_number),
            proof_ref: clean(request.proof_ref),
            notes: clean(request.notes),
        };
        let record = PaymentRecord::new(payment, actor.user_id.clone(), Utc::now());
        self.payments.insert(record.clone()).await?;

        info!(
            payment_id = %record.id,
            student_id = %record.student_id,
            amount = %record.amount.value(),
            submitted_by = %actor.user_id,
            "payment submitted"
        );
        Ok(record)
    }

    /// Moves a payment to `target` on behalf of `actor`.
    ///
    /// The stored record is replaced only if nobody else changed it since it
    /// was read; a concurrent change surfaces as `Conflict`.
    pub async fn transition_payment(
        &self,
        payment_id: PaymentId,
        target: PaymentStatus,
        actor: &Actor,
        rejection_reason: Option<&str>,
    ) -> Result<PaymentRecord> {
        let current = self
            .payments
            .get(payment_id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("payment {payment_id}")))?;

        let next = match lifecycle::apply_transition(
            &current,
            target,
            actor,
            rejection_reason,
            Utc::now(),
        ) {
            Ok(next) => next,
            Err(e) => {
                warn!(
                    payment_id = %payment_id,
                    from = %current.status,
                    to = %target,
                    role = %actor.role,
                    error = %e,
                    "payment transition refused"
                );
                return Err(e);
            }
        };

        self.payments.update(next.clone(), current.version).await?;

        info!(
            payment_id = %payment_id,
            student_id = %next.student_id,
            from = %current.status,
            to = %next.status,
            by = %actor.user_id,
            "payment transitioned"
        );
        Ok(next)
    }

    /// Computes balance snapshots and their rollup from current store state.
    pub async fn compute_balances(&self, filter: &BalanceFilter) -> Result<BalanceReport> {
        let students = self.students.all().await?;
        let payments = self.payments.all().await?;
        let schedule = self.fee_schedule.entries().await?;

        let report = ledger::compute(&students, &payments, &schedule, filter)?;
        debug!(
            students = report.rollup.students,
            payments = payments.len(),
            outstanding = %report.rollup.total_outstanding.value(),
            "balances computed"
        );
        Ok(report)
    }

    /// All payments of one student, oldest submission first.
    pub async fn payment_history(&self, student_id: &StudentId) -> Result<Vec<PaymentRecord>> {
        if self.students.get(student_id).await?.is_none() {
            return Err(LedgerError::NotFound(format!("student {student_id}")));
        }
        let mut records = self.payments.for_student(student_id).await?;
        records.sort_by_key(|record| record.submitted_at);
        Ok(records)
    }

    /// Payments still awaiting a final decision, oldest submission first.
    pub async fn review_queue(&self) -> Result<Vec<PaymentRecord>> {
        let mut records = self.payments.all().await?;
        records.retain(|record| !record.status.is_terminal());
        records.sort_by_key(|record| record.submitted_at);
        Ok(records)
    }
}

fn clean(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
