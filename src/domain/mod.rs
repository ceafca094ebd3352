//! Domain model of fee payment reconciliation: value objects, the payment
//! lifecycle, the balance ledger and the ports the engine talks through.

pub mod fee_schedule;
pub mod identity;
pub mod ledger;
pub mod lifecycle;
pub mod money;
pub mod payment;
pub mod ports;
pub mod student;
