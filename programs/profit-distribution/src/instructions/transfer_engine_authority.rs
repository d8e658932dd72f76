use anchor_lang::prelude::*;

use crate::{
    constants::ENGINE_CONFIG_SEED, errors::ErrorCode, events::EngineAuthorityTransferProposed,
    state::EngineConfig,
};

#[derive(Accounts)]
pub struct TransferEngineAuthority<'info> {
    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.load()?.bump,
        constraint = engine_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    pub authority: Signer<'info>,
}

/// Proposes engine authority transfer to a new address (two-step pattern)
/// Can be overwritten by calling again with different address
/// Set to Pubkey::default() to cancel pending transfer
pub fn handler(ctx: Context<TransferEngineAuthority>, new_authority: Pubkey) -> Result<()> {
    let engine_config = &mut ctx.accounts.engine_config.load_mut()?;

    engine_config.pending_authority = new_authority;

    emit!(EngineAuthorityTransferProposed {
        authority: ctx.accounts.authority.key(),
        pending_authority: new_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
