use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod payouts;
pub mod period;
pub mod policy;
pub mod profit;
pub mod reconciliation;
pub mod state;
mod utils;

use instructions::*;
use payouts::PayoutChannel;
use period::QuarterBounds;
use policy::TierPolicyInput;
use profit::QuarterlyProfit;
use state::LedgerEntryKind;

declare_id!("BAScuFPyhsFjRG11zpjfgcrNSuwv3q8LNv5SSQjL8QQe");

// Security contact information (embedded on-chain)
#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Profit Distribution",
    project_url: env!("CARGO_PKG_HOMEPAGE"),
    contacts: concat!("link:", env!("CARGO_PKG_REPOSITORY"), "/security"),
    policy: concat!(env!("CARGO_PKG_REPOSITORY"), "/blob/main/SECURITY.md"),
    source_code: env!("CARGO_PKG_REPOSITORY"),
    source_release: concat!("v", env!("CARGO_PKG_VERSION"))
}

#[program]
pub mod profit_distribution {
    use super::*;

    /// Initializes the engine configuration and payment vault
    /// Can only be called once by the program's upgrade authority
    pub fn initialize_engine(ctx: Context<InitializeEngine>, treasury: Pubkey) -> Result<()> {
        instructions::initialize_engine::handler(ctx, treasury)
    }

    /// Updates tax rate, profit share rate and treasury
    /// Only callable by current engine authority
    pub fn update_engine_config(
        ctx: Context<UpdateEngineConfig>,
        corporate_tax_bps: u16,
        profit_share_bps: u16,
        treasury: Pubkey,
    ) -> Result<()> {
        instructions::update_engine_config::handler(ctx, corporate_tax_bps, profit_share_bps, treasury)
    }

    /// Proposes engine authority transfer to a new address (two-step pattern)
    /// New authority must call accept_engine_authority to complete
    pub fn transfer_engine_authority(
        ctx: Context<TransferEngineAuthority>,
        new_authority: Pubkey,
    ) -> Result<()> {
        instructions::transfer_engine_authority::handler(ctx, new_authority)
    }

    /// Accepts a pending engine authority transfer
    /// Only callable by the pending authority
    pub fn accept_engine_authority(ctx: Context<AcceptEngineAuthority>) -> Result<()> {
        instructions::accept_engine_authority::handler(ctx)
    }

    /// Installs or replaces one tier's share and payout ceiling policy
    pub fn set_tier_policy(ctx: Context<SetTierPolicy>, input: TierPolicyInput) -> Result<()> {
        instructions::set_tier_policy::handler(ctx, input)
    }

    /// Adds an account to the shareholder registry
    pub fn register_shareholder(
        ctx: Context<RegisterShareholder>,
        owner: Pubkey,
        tier: u8,
        investment_amount: u64,
    ) -> Result<()> {
        instructions::register_shareholder::handler(ctx, owner, tier, investment_amount)
    }

    /// Updates tier, investment amount and owned asset value of a shareholder
    pub fn update_shareholder(
        ctx: Context<UpdateShareholder>,
        tier: u8,
        investment_amount: u64,
        owned_asset_value: u64,
    ) -> Result<()> {
        instructions::update_shareholder::handler(ctx, tier, investment_amount, owned_asset_value)
    }

    /// Share-award event: credits shares under the tier's multiplier and cap
    pub fn award_shares(ctx: Context<AwardShares>, base_shares: u64) -> Result<()> {
        instructions::award_shares::handler(ctx, base_shares)
    }

    /// Books a finalized payout from a channel other than profit distribution
    pub fn record_payout(
        ctx: Context<RecordPayout>,
        channel: PayoutChannel,
        amount: u64,
    ) -> Result<()> {
        instructions::record_payout::handler(ctx, channel, amount)
    }

    /// Books an income or expense movement for a quarter
    pub fn record_ledger_entry(
        ctx: Context<RecordLedgerEntry>,
        period_value: String,
        kind: LedgerEntryKind,
        amount: u64,
        entry_timestamp: i64,
    ) -> Result<()> {
        instructions::record_ledger_entry::handler(ctx, period_value, kind, amount, entry_timestamp)
    }

    /// Returns the inclusive start and end of a quarter
    pub fn validate_quarter(
        ctx: Context<ValidateQuarter>,
        period_type: String,
        period_value: String,
    ) -> Result<QuarterBounds> {
        instructions::validate_quarter::handler(ctx, period_type, period_value)
    }

    /// Returns revenue, expenses, net profit and distributable pool of a quarter
    pub fn calculate_quarterly_profit(
        ctx: Context<CalculateQuarterlyProfit>,
        period_type: String,
        period_value: String,
    ) -> Result<QuarterlyProfit> {
        instructions::calculate_quarterly_profit::handler(ctx, period_type, period_value)
    }

    /// Allocates the quarter's pool across all shareholders
    /// Reprocessing a completed period requires force
    /// Returns the period and its distributions
    pub fn process_quarterly_distribution<'info>(
        ctx: Context<'_, '_, 'info, 'info, ProcessQuarterlyDistribution<'info>>,
        period_type: String,
        period_value: String,
        force: bool,
    ) -> Result<PeriodSummary> {
        instructions::process_quarterly_distribution::handler(ctx, period_type, period_value, force)
    }

    /// Pays one pending distribution from the vault
    pub fn mark_distribution_paid(ctx: Context<MarkDistributionPaid>, index: u8) -> Result<()> {
        instructions::mark_distribution_paid::handler(ctx, index)
    }

    /// Cancels one pending distribution
    pub fn cancel_distribution(ctx: Context<CancelDistribution>, index: u8) -> Result<()> {
        instructions::cancel_distribution::handler(ctx, index)
    }

    /// Pays every pending distribution of a period, reporting failures
    /// Returns the total amount paid
    pub fn process_all_distribution_payments<'info>(
        ctx: Context<'_, '_, 'info, 'info, ProcessAllDistributionPayments<'info>>,
    ) -> Result<u64> {
        instructions::process_all_distribution_payments::handler(ctx)
    }
}
