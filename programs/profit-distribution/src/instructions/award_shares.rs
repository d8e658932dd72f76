use anchor_lang::prelude::*;

use crate::{
    constants::{ENGINE_CONFIG_SEED, SHAREHOLDER_SEED},
    errors::ErrorCode,
    events::SharesAwarded,
    state::{EngineConfig, Shareholder},
};

#[derive(Accounts)]
pub struct AwardShares<'info> {
    #[account(
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.load()?.bump,
        constraint = engine_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    #[account(
        mut,
        seeds = [SHAREHOLDER_SEED, shareholder.load()?.owner.as_ref()],
        bump = shareholder.load()?.bump
    )]
    pub shareholder: AccountLoader<'info, Shareholder>,

    pub authority: Signer<'info>,
}

/// Credits shares after applying the tier's multiplier and maximum-shares cap
pub fn handler(ctx: Context<AwardShares>, base_shares: u64) -> Result<()> {
    require!(base_shares > 0, ErrorCode::ZeroAmount);

    let engine_config = ctx.accounts.engine_config.load()?;
    let shareholder = &mut ctx.accounts.shareholder.load_mut()?;
    let policy = engine_config
        .tier_policy(shareholder.tier)
        .ok_or(ErrorCode::InvalidTier)?;

    let (awarded_shares, capped) = policy.award(shareholder.total_shares, base_shares)?;

    shareholder.total_shares = shareholder
        .total_shares
        .checked_add(awarded_shares)
        .ok_or(ErrorCode::MathOverflow)?;

    #[cfg(feature = "verbose")]
    if capped {
        msg!(
            "Award of {} shares capped to {} by tier {} limit",
            base_shares,
            awarded_shares,
            shareholder.tier
        );
    }

    emit!(SharesAwarded {
        shareholder: ctx.accounts.shareholder.key(),
        base_shares,
        awarded_shares,
        total_shares: shareholder.total_shares,
        capped,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
