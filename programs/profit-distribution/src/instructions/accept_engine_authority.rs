use anchor_lang::prelude::*;

use crate::{
    constants::ENGINE_CONFIG_SEED, errors::ErrorCode, events::EngineAuthorityTransferAccepted,
    state::EngineConfig,
};

#[derive(Accounts)]
pub struct AcceptEngineAuthority<'info> {
    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.load()?.bump,
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    pub new_authority: Signer<'info>,
}

/// Accepts a pending engine authority transfer
/// Only callable by the pending authority
pub fn handler(ctx: Context<AcceptEngineAuthority>) -> Result<()> {
    let engine_config = &mut ctx.accounts.engine_config.load_mut()?;

    require!(
        engine_config.pending_authority != Pubkey::default(),
        ErrorCode::NoPendingTransfer
    );
    require!(
        engine_config.pending_authority == ctx.accounts.new_authority.key(),
        ErrorCode::Unauthorized
    );

    let old_authority = engine_config.authority;
    let new_authority = ctx.accounts.new_authority.key();

    engine_config.authority = new_authority;
    engine_config.pending_authority = Pubkey::default();

    emit!(EngineAuthorityTransferAccepted {
        old_authority,
        new_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
