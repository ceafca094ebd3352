//! Payment review lifecycle.
//!
//! Every legal status change is a row in [`GUARDS`]: the states it may start
//! from, the state it leads to and the roles allowed to perform it. Anything
//! not in the table is an invalid transition; `confirmed` and `rejected` have
//! no outgoing rows and are therefore final.

use super::identity::{Actor, Role};
use super::payment::{PaymentRecord, PaymentStatus};
use super::student::Student;
use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};

/// One row of the transition guard table.
#[derive(Debug)]
pub struct Guard {
    pub from: &'static [PaymentStatus],
    pub to: PaymentStatus,
    pub roles: &'static [Role],
}

pub const GUARDS: &[Guard] = &[
    Guard {
        from: &[PaymentStatus::Pending],
        to: PaymentStatus::Received,
        roles: &[Role::Staff, Role::Admin],
    },
    Guard {
        from: &[PaymentStatus::Pending, PaymentStatus::Received],
        to: PaymentStatus::Confirmed,
        roles: &[Role::Admin],
    },
    Guard {
        from: &[PaymentStatus::Pending, PaymentStatus::Received],
        to: PaymentStatus::Rejected,
        roles: &[Role::Admin],
    },
];

fn guard_for(from: PaymentStatus, to: PaymentStatus) -> Option<&'static Guard> {
    GUARDS
        .iter()
        .find(|guard| guard.to == to && guard.from.contains(&from))
}

/// Checks that `role` may move a payment from `from` to `to`.
pub fn authorize_transition(from: PaymentStatus, to: PaymentStatus, role: Role) -> Result<()> {
    let guard = guard_for(from, to).ok_or(LedgerError::InvalidTransition { from, to })?;

    if guard.roles.contains(&role) {
        Ok(())
    } else {
        Err(LedgerError::Forbidden {
            role,
            action: format!("move a payment from {from} to {to}"),
        })
    }
}

/// Guardians may only pay for their own students; staff and admins record
/// payments taken at the office for anyone.
pub fn authorize_submission(actor: &Actor, student: &Student) -> Result<()> {
    match actor.role {
        Role::Staff | Role::Admin => Ok(()),
        Role::Guardian if student.is_guarded_by(&actor.user_id) => Ok(()),
        Role::Guardian => Err(LedgerError::Forbidden {
            role: actor.role,
            action: format!("submit payments for student {}", student.id),
        }),
    }
}

/// Produces the next version of `record` after moving it to `to`.
///
/// The input record is never modified, so a refused transition leaves no
/// trace.
pub fn apply_transition(
    record: &PaymentRecord,
    to: PaymentStatus,
    actor: &Actor,
    rejection_reason: Option<&str>,
    now: DateTime<Utc>,
) -> Result<PaymentRecord> {
    authorize_transition(record.status, to, actor.role)?;

    let mut next = record.clone();
    next.status = to;
    next.version = record.version + 1;

    match to {
        PaymentStatus::Confirmed => {
            next.confirmed_by = Some(actor.user_id.clone());
            next.confirmed_at = Some(now);
        }
        PaymentStatus::Rejected => {
            let reason = rejection_reason
                .map(str::trim)
                .filter(|reason| !reason.is_empty())
                .ok_or_else(|| LedgerError::validation("a rejection reason is required"))?;
            next.confirmed_by = Some(actor.user_id.clone());
            next.confirmed_at = Some(now);
            next.rejection_reason = Some(reason.to_string());
        }
        PaymentStatus::Pending | PaymentStatus::Received => {}
    }

    Ok(next)
}
