use anchor_lang::prelude::*;

use crate::{
    constants::{ENGINE_CONFIG_SEED, MAX_SHAREHOLDERS, PAYOUT_CHANNELS, SHAREHOLDER_SEED, SHAREHOLDER_SIZE},
    errors::ErrorCode,
    events::ShareholderRegistered,
    state::{EngineConfig, Shareholder},
};

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct RegisterShareholder<'info> {
    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.load()?.bump,
        constraint = engine_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    #[account(
        init,
        payer = authority,
        space = SHAREHOLDER_SIZE,
        seeds = [SHAREHOLDER_SEED, owner.as_ref()],
        bump
    )]
    pub shareholder: AccountLoader<'info, Shareholder>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Adds an account to the shareholder registry
pub fn handler(
    ctx: Context<RegisterShareholder>,
    owner: Pubkey,
    tier: u8,
    investment_amount: u64,
) -> Result<()> {
    require!(owner != Pubkey::default(), ErrorCode::ZeroAddress);

    let engine_config = &mut ctx.accounts.engine_config.load_mut()?;
    require!(
        engine_config.tier_policy(tier).is_some(),
        ErrorCode::InvalidTier
    );
    require!(
        (engine_config.shareholder_count as usize) < MAX_SHAREHOLDERS,
        ErrorCode::TooManyShareholders
    );

    let now = Clock::get()?.unix_timestamp;
    let shareholder = &mut ctx.accounts.shareholder.load_init()?;

    shareholder.owner = owner;
    shareholder.total_shares = 0;
    shareholder.investment_amount = investment_amount;
    shareholder.owned_asset_value = 0;
    shareholder.channel_payouts = [0; PAYOUT_CHANNELS];
    shareholder.registered_at = now;
    shareholder.pending_distributions = 0;
    shareholder.tier = tier;
    shareholder.maxout_reached = 0;
    shareholder.bump = ctx.bumps.shareholder;

    engine_config.shareholder_count = engine_config
        .shareholder_count
        .checked_add(1)
        .ok_or(ErrorCode::MathOverflow)?;

    emit!(ShareholderRegistered {
        shareholder: ctx.accounts.shareholder.key(),
        owner,
        tier,
        investment_amount,
        timestamp: now,
    });

    Ok(())
}
