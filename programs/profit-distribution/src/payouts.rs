use anchor_lang::prelude::*;

use crate::{
    constants::PAYOUT_CHANNELS,
    errors::ErrorCode,
    policy::Ceiling,
    state::{Shareholder, TierPolicy},
};

/// Channel a finalized payout was made through
/// Index into `Shareholder::channel_payouts`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayoutChannel {
    ProfitDistribution,
    Withdrawal,
    Commission,
    VipSupport,
    Bonus,
}

impl PayoutChannel {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Channels whose payouts are refused once they would cross the ceiling
    pub fn is_capped(self) -> bool {
        matches!(self, Self::Commission | Self::VipSupport | Self::Bonus)
    }
}

/// Sum of finalized payouts across every channel
pub fn cumulative_payout(channel_payouts: &[u64; PAYOUT_CHANNELS]) -> Result<u64> {
    channel_payouts
        .iter()
        .try_fold(0u64, |acc, amount| acc.checked_add(*amount))
        .ok_or_else(|| error!(ErrorCode::MathOverflow))
}

/// Amount that can still be paid before the ceiling is reached
/// `None` when the ceiling is unlimited
pub fn headroom(ceiling: Ceiling, paid_to_date: u64) -> Option<u64> {
    match ceiling {
        Ceiling::Unlimited => None,
        Ceiling::Finite(limit) => Some(limit.saturating_sub(paid_to_date)),
    }
}

/// True once payouts have reached a finite ceiling
pub fn is_maxed_out(ceiling: Ceiling, paid_to_date: u64) -> bool {
    headroom(ceiling, paid_to_date) == Some(0)
}

impl Shareholder {
    pub fn cumulative_payout(&self) -> Result<u64> {
        cumulative_payout(&self.channel_payouts)
    }

    /// Finalized payouts plus distributions allocated but not yet settled
    pub fn committed_payout(&self) -> Result<u64> {
        self.cumulative_payout()?
            .checked_add(self.pending_distributions)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    /// Books a finalized payout in `channel`
    pub fn record_payout(&mut self, channel: PayoutChannel, amount: u64) -> Result<()> {
        let slot = &mut self.channel_payouts[channel.index()];
        *slot = slot.checked_add(amount).ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    pub fn ceiling(&self, policy: &TierPolicy) -> Result<Ceiling> {
        policy.resolve_ceiling(self.investment_amount, self.owned_asset_value)
    }

    pub fn refresh_maxout(&mut self, ceiling: Ceiling) -> Result<bool> {
        let reached = is_maxed_out(ceiling, self.committed_payout()?);
        self.maxout_reached = reached as u8;
        Ok(reached)
    }

    /// Holds back headroom for a distribution that is now pending
    pub fn reserve_distribution(&mut self, amount: u64) -> Result<()> {
        self.pending_distributions = self
            .pending_distributions
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Gives back headroom held for a pending distribution
    pub fn release_distribution(&mut self, amount: u64) -> Result<()> {
        self.pending_distributions = self
            .pending_distributions
            .checked_sub(amount)
            .ok_or(ErrorCode::MathUnderflow)?;
        Ok(())
    }

    /// Settles a pending distribution as paid and refreshes the cached maxout flag
    pub fn credit_distribution(&mut self, amount: u64, policy: &TierPolicy) -> Result<bool> {
        self.release_distribution(amount)?;
        self.record_payout(PayoutChannel::ProfitDistribution, amount)?;
        let ceiling = self.ceiling(policy)?;
        self.refresh_maxout(ceiling)
    }

    /// Drops a pending distribution without paying it
    pub fn cancel_distribution(&mut self, amount: u64, policy: &TierPolicy) -> Result<bool> {
        self.release_distribution(amount)?;
        let ceiling = self.ceiling(policy)?;
        self.refresh_maxout(ceiling)
    }
}
