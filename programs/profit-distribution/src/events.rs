use anchor_lang::prelude::*;

#[event]
pub struct EngineConfigCreated {
    pub authority: Pubkey,
    pub treasury: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub corporate_tax_bps: u16,
    pub profit_share_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct EngineConfigUpdated {
    pub authority: Pubkey,
    pub old_corporate_tax_bps: u16,
    pub new_corporate_tax_bps: u16,
    pub old_profit_share_bps: u16,
    pub new_profit_share_bps: u16,
    pub old_treasury: Pubkey,
    pub new_treasury: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct EngineAuthorityTransferProposed {
    pub authority: Pubkey,
    pub pending_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct EngineAuthorityTransferAccepted {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct TierPolicySet {
    pub tier: u8,
    pub ceiling_kind: u8,
    pub ceiling_bps: u32,
    pub nominal_ceiling_bps: u32,
    pub share_multiplier_bps: u32,
    pub max_shares: u64,
    pub share_exempt: bool,
    pub timestamp: i64,
}

#[event]
pub struct ShareholderRegistered {
    pub shareholder: Pubkey,
    pub owner: Pubkey,
    pub tier: u8,
    pub investment_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct ShareholderUpdated {
    pub shareholder: Pubkey,
    pub old_tier: u8,
    pub new_tier: u8,
    pub investment_amount: u64,
    pub owned_asset_value: u64,
    pub timestamp: i64,
}

#[event]
pub struct SharesAwarded {
    pub shareholder: Pubkey,
    pub base_shares: u64,
    pub awarded_shares: u64,
    pub total_shares: u64,
    /// The tier's maximum-shares cap cut the award short
    pub capped: bool,
    pub timestamp: i64,
}

#[event]
pub struct PayoutRecorded {
    pub shareholder: Pubkey,
    pub channel: u8,
    pub amount: u64,
    pub cumulative_payout: u64,
    pub maxout_reached: bool,
    pub timestamp: i64,
}

#[event]
pub struct LedgerEntryRecorded {
    pub ledger: Pubkey,
    pub period_value: String,
    pub is_income: bool,
    pub amount: u64,
    pub entry_timestamp: i64,
    pub revenue: u64,
    pub expenses: u64,
    pub timestamp: i64,
}

#[event]
pub struct QuarterlyProfitCalculated {
    pub period_value: String,
    pub revenue: u64,
    pub expenses: u64,
    pub net_profit: i64,
    pub distributable_pool: u64,
    pub timestamp: i64,
}

#[event]
pub struct PriorDistributionsDiscarded {
    pub period: Pubkey,
    pub generation: u32,
    pub discarded_count: u8,
    pub rollover_reversed: u64,
    pub timestamp: i64,
}

#[event]
pub struct ShareholderMaxedOut {
    pub period: Pubkey,
    pub shareholder: Pubkey,
    pub ceiling: u64,
    pub cumulative_with_allocation: u64,
    pub timestamp: i64,
}

/// A tier lists a nominal ceiling multiplier that the enforcement path ignores
#[event]
pub struct UnenforcedTierCeiling {
    pub period: Pubkey,
    pub shareholder: Pubkey,
    pub tier: u8,
    pub nominal_ceiling_bps: u32,
    pub timestamp: i64,
}

#[event]
pub struct RolloverBooked {
    pub period: Pubkey,
    pub treasury: Pubkey,
    pub amount: u64,
    pub rounds: u8,
    pub treasury_rollover: u64,
    pub timestamp: i64,
}

#[event]
pub struct ReconciliationMismatch {
    pub period: Pubkey,
    pub pool: u64,
    pub accounted_for: u64,
    pub timestamp: i64,
}

#[event]
pub struct PeriodProcessed {
    pub period: Pubkey,
    pub period_value: String,
    pub generation: u32,
    pub total_revenue: u64,
    pub total_expenses: u64,
    pub net_profit: u64,
    pub distributable_pool: u64,
    pub total_eligible_shares: u64,
    pub per_share_rate: u64,
    pub distribution_count: u8,
    pub distributed: u64,
    pub remainder: u64,
    pub rounds: u8,
    pub forced: bool,
    pub timestamp: i64,
}

#[event]
pub struct DistributionPaid {
    pub period: Pubkey,
    pub index: u8,
    pub shareholder: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct DistributionCancelled {
    pub period: Pubkey,
    pub index: u8,
    pub shareholder: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct DistributionPaymentFailed {
    pub period: Pubkey,
    pub index: u8,
    pub shareholder: Pubkey,
    pub amount: u64,
    /// See `utils::PaymentFailure`
    pub reason: u8,
    pub timestamp: i64,
}

#[event]
pub struct DistributionPaymentsProcessed {
    pub period: Pubkey,
    pub paid_count: u8,
    pub failed_count: u8,
    pub total_paid: u64,
    pub timestamp: i64,
}
