use anchor_lang::prelude::*;

use crate::{engine::Allocation, errors::ErrorCode};

/// Outcome of checking a run's allocations against its pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reconciliation {
    pub pool: u64,
    pub accounted_for: u64,
    pub remainder: u64,
}

impl Reconciliation {
    pub fn is_balanced(&self) -> bool {
        self.accounted_for == self.pool
    }

    /// Signed pool minus accounted-for amount; zero when balanced
    pub fn discrepancy(&self) -> i128 {
        i128::from(self.pool) - i128::from(self.accounted_for)
    }
}

/// Σ allocations + remainder, compared with the pool
/// A mismatch is reported, never rejected
pub fn reconcile(pool: u64, allocations: &[Allocation], remainder: u64) -> Result<Reconciliation> {
    let accounted_for = allocations
        .iter()
        .try_fold(remainder, |acc, a| acc.checked_add(a.amount))
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(Reconciliation {
        pool,
        accounted_for,
        remainder,
    })
}
