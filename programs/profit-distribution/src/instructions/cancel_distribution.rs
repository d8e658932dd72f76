use anchor_lang::prelude::*;

use crate::{
    constants::{ENGINE_CONFIG_SEED, PROFIT_PERIOD_SEED, SHAREHOLDER_SEED},
    errors::ErrorCode,
    events::DistributionCancelled,
    instructions::mark_distribution_paid::ensure_payable,
    state::{EngineConfig, PaymentStatus, ProfitPeriod, Shareholder},
};

#[derive(Accounts)]
pub struct CancelDistribution<'info> {
    #[account(
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.load()?.bump,
        constraint = engine_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    #[account(
        mut,
        seeds = [PROFIT_PERIOD_SEED, profit_period.load()?.period_value.as_ref()],
        bump = profit_period.load()?.bump
    )]
    pub profit_period: AccountLoader<'info, ProfitPeriod>,

    #[account(
        mut,
        seeds = [SHAREHOLDER_SEED, shareholder.load()?.owner.as_ref()],
        bump = shareholder.load()?.bump
    )]
    pub shareholder: AccountLoader<'info, Shareholder>,

    pub authority: Signer<'info>,
}

/// Moves a pending distribution to cancelled (terminal) and frees the
/// shareholder headroom it held
pub fn handler(ctx: Context<CancelDistribution>, index: u8) -> Result<()> {
    let period = &mut ctx.accounts.profit_period.load_mut()?;
    require!(
        (index as usize) < period.distribution_count as usize,
        ErrorCode::DistributionNotFound
    );

    let entry = &mut period.distributions[index as usize];
    ensure_payable(entry)?;
    require!(
        entry.shareholder == ctx.accounts.shareholder.key(),
        ErrorCode::InvalidShareholderAccount
    );
    entry.payment_status = PaymentStatus::Cancelled as u8;

    {
        let engine_config = ctx.accounts.engine_config.load()?;
        let shareholder = &mut ctx.accounts.shareholder.load_mut()?;
        let policy = engine_config
            .tier_policy(shareholder.tier)
            .ok_or(ErrorCode::InvalidTier)?;
        shareholder.cancel_distribution(entry.amount, policy)?;
    }

    emit!(DistributionCancelled {
        period: ctx.accounts.profit_period.key(),
        index,
        shareholder: entry.shareholder,
        amount: entry.amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
