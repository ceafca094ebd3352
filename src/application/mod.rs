//! Application layer orchestrating the domain.
//!
//! `FeeEngine` is the entry point for submitting payments, moving them
//! through review and computing balances. It holds only boxed collaborators,
//! never a cached copy of their data.

pub mod engine;
