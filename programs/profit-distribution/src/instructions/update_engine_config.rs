use anchor_lang::prelude::*;

use crate::{
    constants::{ENGINE_CONFIG_SEED, MAX_RATE_BPS},
    errors::ErrorCode,
    events::EngineConfigUpdated,
    state::EngineConfig,
};

#[derive(Accounts)]
pub struct UpdateEngineConfig<'info> {
    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.load()?.bump,
        constraint = engine_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    pub authority: Signer<'info>,
}

/// Updates tax rate, profit share rate and treasury attribution
/// Takes effect from the next processing run
pub fn handler(
    ctx: Context<UpdateEngineConfig>,
    corporate_tax_bps: u16,
    profit_share_bps: u16,
    treasury: Pubkey,
) -> Result<()> {
    require!(corporate_tax_bps <= MAX_RATE_BPS, ErrorCode::InvalidRate);
    require!(profit_share_bps <= MAX_RATE_BPS, ErrorCode::InvalidRate);
    require!(treasury != Pubkey::default(), ErrorCode::ZeroAddress);

    let engine_config = &mut ctx.accounts.engine_config.load_mut()?;
    let old_corporate_tax_bps = engine_config.corporate_tax_bps;
    let old_profit_share_bps = engine_config.profit_share_bps;
    let old_treasury = engine_config.treasury;

    engine_config.corporate_tax_bps = corporate_tax_bps;
    engine_config.profit_share_bps = profit_share_bps;
    engine_config.treasury = treasury;

    emit!(EngineConfigUpdated {
        authority: ctx.accounts.authority.key(),
        old_corporate_tax_bps,
        new_corporate_tax_bps: corporate_tax_bps,
        old_profit_share_bps,
        new_profit_share_bps: profit_share_bps,
        old_treasury,
        new_treasury: treasury,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
