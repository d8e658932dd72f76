use anchor_lang::prelude::*;

use crate::{
    constants::ENGINE_CONFIG_SEED,
    errors::ErrorCode,
    events::TierPolicySet,
    policy::TierPolicyInput,
    state::EngineConfig,
};

#[derive(Accounts)]
pub struct SetTierPolicy<'info> {
    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.load()?.bump,
        constraint = engine_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    pub authority: Signer<'info>,
}

/// Installs or replaces the policy of one tier
pub fn handler(ctx: Context<SetTierPolicy>, input: TierPolicyInput) -> Result<()> {
    input.validate()?;

    let engine_config = &mut ctx.accounts.engine_config.load_mut()?;
    engine_config.tier_policies[input.tier as usize] = input.to_policy();

    emit!(TierPolicySet {
        tier: input.tier,
        ceiling_kind: input.ceiling_kind as u8,
        ceiling_bps: input.ceiling_bps,
        nominal_ceiling_bps: input.nominal_ceiling_bps,
        share_multiplier_bps: input.share_multiplier_bps,
        max_shares: input.max_shares,
        share_exempt: input.share_exempt,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
