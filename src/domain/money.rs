use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A signed monetary position in the single school currency.
///
/// Balances may go negative: an overpaid student carries a negative balance
/// that is reported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

/// A strictly positive monetary amount carried by a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::validation(format!(
                "amount must be positive, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Negative positions (credit) count as nothing owed.
    pub fn owed(self) -> Self {
        self.max(Self::ZERO)
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, LedgerError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| out_of_range(self, "+", rhs))
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, LedgerError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or_else(|| out_of_range(self, "-", rhs))
    }

    /// Sums balances, failing instead of overflowing.
    pub fn total<I: IntoIterator<Item = Self>>(balances: I) -> Result<Self, LedgerError> {
        balances
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }
}

fn out_of_range(lhs: Balance, op: &str, rhs: Balance) -> LedgerError {
    LedgerError::validation(format!(
        "{} {op} {} exceeds the representable amount range",
        lhs.0, rhs.0
    ))
}
