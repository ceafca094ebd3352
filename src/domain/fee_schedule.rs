use super::money::Balance;
use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exact-match key of a fee schedule row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleKey {
    pub level: String,
    pub curriculum: String,
    pub academic_year: String,
}

impl ScheduleKey {
    pub fn new(
        level: impl Into<String>,
        curriculum: impl Into<String>,
        academic_year: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            curriculum: curriculum.into(),
            academic_year: academic_year.into(),
        }
    }
}

/// The total fee billed for one level of one curriculum in one academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeScheduleEntry {
    pub key: ScheduleKey,
    pub total_fee: Balance,
}

impl FeeScheduleEntry {
    pub fn new(key: ScheduleKey, total_fee: Decimal) -> Result<Self, LedgerError> {
        if total_fee < Decimal::ZERO {
            return Err(LedgerError::validation(format!(
                "total fee for {}/{}/{} must not be negative",
                key.level, key.curriculum, key.academic_year
            )));
        }
        Ok(Self {
            key,
            total_fee: Balance::new(total_fee),
        })
    }
}

/// Returns the entry matching `key` on all three fields.
///
/// When a collaborator store holds duplicate keys, the first entry in
/// retrieval order wins.
pub fn lookup<'a, I>(entries: I, key: &ScheduleKey) -> Option<&'a FeeScheduleEntry>
where
    I: IntoIterator<Item = &'a FeeScheduleEntry>,
{
    entries.into_iter().find(|entry| &entry.key == key)
}
