use anchor_lang::prelude::*;

use crate::{
    constants::{ENGINE_CONFIG_SEED, SHAREHOLDER_SEED},
    errors::ErrorCode,
    events::PayoutRecorded,
    payouts::{headroom, PayoutChannel},
    state::{EngineConfig, Shareholder},
};

#[derive(Accounts)]
pub struct RecordPayout<'info> {
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

/// Books a finalized payout made outside profit distribution
/// Capped channels are refused once they would cross the payout ceiling,
/// counting distributions that are allocated but still unpaid
pub fn handler(ctx: Context<RecordPayout>, channel: PayoutChannel, amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::ZeroAmount);
    // Written only by distribution payments
    require!(
        channel != PayoutChannel::ProfitDistribution,
        ErrorCode::InvalidPayoutChannel
    );

    let engine_config = ctx.accounts.engine_config.load()?;
    let shareholder = &mut ctx.accounts.shareholder.load_mut()?;
    let policy = engine_config
        .tier_policy(shareholder.tier)
        .ok_or(ErrorCode::InvalidTier)?;
    let ceiling = shareholder.ceiling(policy)?;

    if channel.is_capped() {
        if let Some(room) = headroom(ceiling, shareholder.committed_payout()?) {
            require!(amount <= room, ErrorCode::PayoutExceedsCeiling);
        }
    }

    shareholder.record_payout(channel, amount)?;
    let maxout_reached = shareholder.refresh_maxout(ceiling)?;

    emit!(PayoutRecorded {
        shareholder: ctx.accounts.shareholder.key(),
        channel: channel as u8,
        amount,
        cumulative_payout: shareholder.cumulative_payout()?,
        maxout_reached,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
