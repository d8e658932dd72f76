//! Proportional pool allocation under per-account payout ceilings
//!
//! Pass 0 splits the pool by shares and clips each account to its headroom.
//! Whatever was clipped (plus flooring dust) is then offered again, by shares,
//! to the accounts that still have headroom, for at most
//! `MAX_REDISTRIBUTION_ROUNDS` rounds. Anything left is the remainder that
//! reconciliation books to the treasury.

use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_REDISTRIBUTION_ROUNDS, MIN_ROUND_ALLOCATION, ROUND_PROGRESS_DIVISOR},
    errors::ErrorCode,
    payouts::headroom,
    policy::Ceiling,
    utils::pro_rata_floor,
};

/// One eligible shareholder as seen by the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub shares: u64,
    pub ceiling: Ceiling,
    /// Cumulative payout plus distributions still pending from other runs
    pub committed: u64,
}

impl Candidate {
    /// Headroom left after `allocated` from the current run; `None` = unlimited
    fn headroom_after(&self, allocated: u64) -> Option<u64> {
        headroom(self.ceiling, self.committed.saturating_add(allocated))
    }

    fn can_take_more(&self, allocated: u64) -> bool {
        self.headroom_after(allocated).map_or(true, |room| room > 0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Allocation {
    pub amount: u64,
    /// The ceiling cut this allocation below its proportional share
    pub maxout_applied: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistributionPlan {
    /// Same order as the candidates
    pub allocations: Vec<Allocation>,
    pub total_shares: u64,
    pub distributed: u64,
    /// Pool left undistributed after the last round
    pub remainder: u64,
    /// Redistribution rounds executed (pass 0 not counted)
    pub rounds: u8,
}

/// Smallest round total worth another round
fn round_threshold(remaining: u64) -> u64 {
    MIN_ROUND_ALLOCATION.min(remaining / ROUND_PROGRESS_DIVISOR)
}

/// Allocates `pool` across `candidates`
///
/// Every allocation floors toward zero, so `distributed + remainder == pool`
/// holds exactly and no candidate's payout passes its ceiling.
pub fn distribute(pool: u64, candidates: &[Candidate]) -> Result<DistributionPlan> {
    let total_shares = candidates
        .iter()
        .try_fold(0u64, |acc, c| acc.checked_add(c.shares))
        .ok_or(ErrorCode::MathOverflow)?;
    require!(total_shares > 0, ErrorCode::NoEligibleShares);

    let mut allocations = vec![Allocation::default(); candidates.len()];
    let mut distributed = 0u64;

    // Pass 0: proportional allocation clipped to headroom
    for (candidate, allocation) in candidates.iter().zip(allocations.iter_mut()) {
        let raw = pro_rata_floor(pool, candidate.shares, total_shares)?;
        let amount = match candidate.headroom_after(0) {
            Some(room) => raw.min(room),
            None => raw,
        };
        allocation.amount = amount;
        allocation.maxout_applied = amount < raw;
        distributed = distributed.checked_add(amount).ok_or(ErrorCode::MathOverflow)?;
    }

    let mut remaining = pool.checked_sub(distributed).ok_or(ErrorCode::MathUnderflow)?;
    let mut rounds = 0u8;

    while rounds < MAX_REDISTRIBUTION_ROUNDS && remaining > 0 {
        let eligible_shares = candidates
            .iter()
            .zip(allocations.iter())
            .filter(|(c, a)| c.can_take_more(a.amount))
            .try_fold(0u64, |acc, (c, _)| acc.checked_add(c.shares))
            .ok_or(ErrorCode::MathOverflow)?;

        // Everyone is capped; the rest goes to reconciliation
        if eligible_shares == 0 {
            break;
        }

        rounds += 1;
        let mut round_total = 0u64;

        for (candidate, allocation) in candidates.iter().zip(allocations.iter_mut()) {
            if !candidate.can_take_more(allocation.amount) {
                continue;
            }

            let share = pro_rata_floor(remaining, candidate.shares, eligible_shares)?;
            let grant = match candidate.headroom_after(allocation.amount) {
                Some(room) if share > room => {
                    allocation.maxout_applied = true;
                    room
                }
                _ => share,
            };

            allocation.amount = allocation
                .amount
                .checked_add(grant)
                .ok_or(ErrorCode::MathOverflow)?;
            round_total = round_total.checked_add(grant).ok_or(ErrorCode::MathOverflow)?;
        }

        let threshold = round_threshold(remaining);
        remaining = remaining.checked_sub(round_total).ok_or(ErrorCode::MathUnderflow)?;
        distributed = distributed.checked_add(round_total).ok_or(ErrorCode::MathOverflow)?;

        #[cfg(feature = "verbose")]
        msg!("Redistribution round {}: {} allocated, {} remaining", rounds, round_total, remaining);

        // No meaningful progress; further rounds only shuffle dust
        if round_total == 0 || round_total < threshold {
            break;
        }
    }

    Ok(DistributionPlan {
        allocations,
        total_shares,
        distributed,
        remainder: remaining,
        rounds,
    })
}
