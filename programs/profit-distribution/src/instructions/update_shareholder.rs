use anchor_lang::prelude::*;

use crate::{
    constants::{ENGINE_CONFIG_SEED, SHAREHOLDER_SEED},
    errors::ErrorCode,
    events::ShareholderUpdated,
    state::{EngineConfig, Shareholder},
};

#[derive(Accounts)]
pub struct UpdateShareholder<'info> {
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

/// Updates the attributes a payout ceiling is resolved from
/// The cached maxout flag is re-derived against the new ceiling
pub fn handler(
    ctx: Context<UpdateShareholder>,
    tier: u8,
    investment_amount: u64,
    owned_asset_value: u64,
) -> Result<()> {
    let engine_config = ctx.accounts.engine_config.load()?;
    let policy = *engine_config.tier_policy(tier).ok_or(ErrorCode::InvalidTier)?;

    let shareholder = &mut ctx.accounts.shareholder.load_mut()?;
    let old_tier = shareholder.tier;

    shareholder.tier = tier;
    shareholder.investment_amount = investment_amount;
    shareholder.owned_asset_value = owned_asset_value;

    let ceiling = shareholder.ceiling(&policy)?;
    shareholder.refresh_maxout(ceiling)?;

    emit!(ShareholderUpdated {
        shareholder: ctx.accounts.shareholder.key(),
        old_tier,
        new_tier: tier,
        investment_amount,
        owned_asset_value,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
