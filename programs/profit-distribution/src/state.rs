use anchor_lang::prelude::*;

use crate::constants::{MAX_SHAREHOLDERS, MAX_TIERS, PAYOUT_CHANNELS, PERIOD_VALUE_LEN};

/// Global engine configuration (single instance)
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct EngineConfig {
    /// Authority that can configure the engine and run distributions
    pub authority: Pubkey,
    /// Pending authority for two-step transfer (default = no pending transfer)
    pub pending_authority: Pubkey,
    /// System account that undistributed pool remainders are attributed to
    pub treasury: Pubkey,
    /// Currency mint; every amount is in its base units
    pub mint: Pubkey,
    /// Vault (PDA-owned ATA) that distribution payments are made from
    pub vault: Pubkey,
    /// Running total of remainders booked as treasury rollover
    pub treasury_rollover: u64,
    /// Payout ceiling rules, indexed by tier
    pub tier_policies: [TierPolicy; MAX_TIERS],
    /// Corporate tax applied to net profit, in basis points
    pub corporate_tax_bps: u16,
    /// Share of after-tax profit that forms the distributable pool, in basis points
    pub profit_share_bps: u16,
    /// Number of registered shareholder accounts
    pub shareholder_count: u16,
    /// Bump seed for PDA derivation (stored for CU optimization)
    pub bump: u8,
    pub _padding: [u8; 1],
}

impl EngineConfig {
    pub fn tier_policy(&self, tier: u8) -> Option<&TierPolicy> {
        self.tier_policies
            .get(tier as usize)
            .filter(|policy| policy.configured != 0)
    }
}

/// Per-tier share and payout ceiling policy
#[zero_copy(unsafe)]
#[repr(C)]
#[derive(Default)]
pub struct TierPolicy {
    /// Maximum total shares an account of this tier may hold (0 = uncapped)
    pub max_shares: u64,
    /// Ceiling multiplier in basis points, interpreted per `ceiling_kind`
    pub ceiling_bps: u32,
    /// Multiplier listed for reporting only; never enforced
    pub nominal_ceiling_bps: u32,
    /// Multiplier applied to awarded shares, in basis points
    pub share_multiplier_bps: u32,
    /// Tier identifier (equals the slot index)
    pub tier: u8,
    /// See `policy::CeilingKind`
    pub ceiling_kind: u8,
    /// Accounts of this tier never take part in distributions
    pub share_exempt: u8,
    /// Slot holds a policy
    pub configured: u8,
}

/// Shareholder registry entry
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct Shareholder {
    /// Wallet that owns this shareholding
    pub owner: Pubkey,
    /// Total shares owned
    pub total_shares: u64,
    /// Amount invested, in minor units
    pub investment_amount: u64,
    /// Value of purchased assets (cards), in minor units
    pub owned_asset_value: u64,
    /// Finalized payouts per channel, indexed by `payouts::PayoutChannel`
    pub channel_payouts: [u64; PAYOUT_CHANNELS],
    /// Registration timestamp
    pub registered_at: i64,
    /// Allocated but not yet paid or cancelled, across every period
    pub pending_distributions: u64,
    /// Business tier
    pub tier: u8,
    /// Cached: payouts plus pending distributions have reached the ceiling
    pub maxout_reached: u8,
    /// Bump seed for PDA derivation
    pub bump: u8,
    pub _padding: [u8; 5],
}

/// Income and expense totals booked for one quarter
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct QuarterLedger {
    /// Sum of income entries
    pub revenue: u64,
    /// Sum of expense entries
    pub expenses: u64,
    /// Timestamp of the earliest booked entry
    pub first_entry_at: i64,
    /// Timestamp of the latest booked entry
    pub last_entry_at: i64,
    /// Number of booked entries
    pub entry_count: u32,
    /// "YYYY-Qn"
    pub period_value: [u8; PERIOD_VALUE_LEN],
    pub bump: u8,
    pub _padding: [u8; 4],
}

/// Profit sharing period with its distributions
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct ProfitPeriod {
    pub total_revenue: u64,
    pub total_expenses: u64,
    pub net_profit: u64,
    pub tax_amount: u64,
    pub net_profit_after_tax: u64,
    pub distributable_pool: u64,
    pub total_eligible_shares: u64,
    /// Pool per share, scaled by PER_SHARE_RATE_SCALE
    pub per_share_rate: u64,
    /// Pool amount booked as treasury rollover by the latest run
    pub remainder_booked: u64,
    /// Sum of paid distributions
    pub total_paid: u64,
    pub processed_at: i64,
    pub completed_at: i64,
    /// Fixed array of distributions (use distribution_count to determine active entries)
    pub distributions: [DistributionEntry; MAX_SHAREHOLDERS],
    /// Incremented on every processing run
    pub generation: u32,
    pub distribution_count: u8,
    /// See `PeriodStatus`
    pub status: u8,
    /// Redistribution rounds consumed by the latest run
    pub rounds: u8,
    pub bump: u8,
    /// "YYYY-Qn"
    pub period_value: [u8; PERIOD_VALUE_LEN],
    pub _padding: [u8; 1],
}

impl ProfitPeriod {
    pub fn is_completed(&self) -> bool {
        self.status == PeriodStatus::Completed as u8
    }

    pub fn active_distributions(&self) -> &[DistributionEntry] {
        &self.distributions[..self.distribution_count as usize]
    }

    pub fn has_paid_distributions(&self) -> bool {
        self.active_distributions().iter().any(|d| d.is_paid())
    }
}

/// Allocation to one shareholder within a period
#[zero_copy(unsafe)]
#[repr(C)]
#[derive(Default)]
pub struct DistributionEntry {
    /// Shareholder account (PDA) this allocation belongs to
    pub shareholder: Pubkey,
    /// Shares owned at allocation time
    pub shares: u64,
    /// Allocated amount, in minor units
    pub amount: u64,
    /// Payment timestamp (0 until paid)
    pub paid_at: i64,
    /// Allocation was limited by the payout ceiling
    pub maxout_applied: u8,
    /// See `PaymentStatus`
    pub payment_status: u8,
    pub _padding: [u8; 6],
}

impl DistributionEntry {
    pub fn is_pending(&self) -> bool {
        self.payment_status == PaymentStatus::Pending as u8
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid as u8
    }

    pub fn is_cancelled(&self) -> bool {
        self.payment_status == PaymentStatus::Cancelled as u8
    }
}

/// A processing run is atomic, so `Processing` is never observed on-chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PeriodStatus {
    Pending = 0,
    Processing = 1,
    Completed = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PaymentStatus {
    Pending = 0,
    Paid = 1,
    Cancelled = 2,
}

/// Kind of a company ledger movement feeding the profit calculation
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerEntryKind {
    Income,
    Expense,
}

// Compile-time size assertions to catch accidental struct changes
// See constants.rs for the field breakdown (sizes below exclude the 8-byte discriminator)
const _: () = assert!(std::mem::size_of::<TierPolicy>() == 24);
const _: () = assert!(std::mem::size_of::<DistributionEntry>() == 64);
const _: () = assert!(std::mem::size_of::<EngineConfig>() == 368);
const _: () = assert!(std::mem::size_of::<Shareholder>() == 120);
const _: () = assert!(std::mem::size_of::<QuarterLedger>() == 48);
const _: () = assert!(std::mem::size_of::<ProfitPeriod>() == 1392);
