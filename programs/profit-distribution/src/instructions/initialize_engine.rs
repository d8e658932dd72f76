use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{
    constants::{
        DEFAULT_CORPORATE_TAX_BPS, DEFAULT_PROFIT_SHARE_BPS, ENGINE_CONFIG_SEED, ENGINE_CONFIG_SIZE,
    },
    errors::ErrorCode,
    events::EngineConfigCreated,
    policy::default_tier_policies,
    state::EngineConfig,
    ID,
};

#[derive(Accounts)]
pub struct InitializeEngine<'info> {
    #[account(
        init,
        payer = authority,
        space = ENGINE_CONFIG_SIZE,
        seeds = [ENGINE_CONFIG_SEED],
        bump
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: The program's executable data account - validated in handler
    #[account(
        constraint = program_data.owner == &anchor_lang::solana_program::bpf_loader_upgradeable::id()
            @ ErrorCode::Unauthorized
    )]
    pub program_data: AccountInfo<'info>,

    /// Currency of every amount the engine handles
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = authority,
        associated_token::mint = mint,
        associated_token::authority = engine_config,
        associated_token::token_program = token_program,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Initializes the engine configuration and its payment vault
/// Can only be called once by the program's upgrade authority
pub fn handler(ctx: Context<InitializeEngine>, treasury: Pubkey) -> Result<()> {
    require!(treasury != Pubkey::default(), ErrorCode::ZeroAddress);

    // Verify program_data is the correct PDA for our program
    let (expected_program_data, _) = Pubkey::find_program_address(
        &[ID.as_ref()],
        &anchor_lang::solana_program::bpf_loader_upgradeable::id(),
    );
    require!(
        ctx.accounts.program_data.key() == expected_program_data,
        ErrorCode::Unauthorized
    );

    // UpgradeableLoaderState::ProgramData layout:
    // - 4 bytes: discriminant
    // - 8 bytes: slot
    // - 1 byte: Option discriminant for upgrade_authority
    // - 32 bytes: upgrade_authority pubkey (if Some)
    let upgrade_authority = {
        let data = ctx.accounts.program_data.try_borrow_data()?;
        require!(data.len() >= 45, ErrorCode::Unauthorized);
        require!(data[12] == 1, ErrorCode::Unauthorized);
        Pubkey::try_from(&data[13..45]).map_err(|_| ErrorCode::Unauthorized)?
    };

    require!(
        upgrade_authority == ctx.accounts.authority.key(),
        ErrorCode::Unauthorized
    );

    let engine_config = &mut ctx.accounts.engine_config.load_init()?;

    engine_config.authority = ctx.accounts.authority.key();
    engine_config.pending_authority = Pubkey::default();
    engine_config.treasury = treasury;
    engine_config.mint = ctx.accounts.mint.key();
    engine_config.vault = ctx.accounts.vault.key();
    engine_config.treasury_rollover = 0;
    engine_config.tier_policies = default_tier_policies();
    engine_config.corporate_tax_bps = DEFAULT_CORPORATE_TAX_BPS;
    engine_config.profit_share_bps = DEFAULT_PROFIT_SHARE_BPS;
    engine_config.shareholder_count = 0;
    engine_config.bump = ctx.bumps.engine_config;

    emit!(EngineConfigCreated {
        authority: ctx.accounts.authority.key(),
        treasury,
        mint: ctx.accounts.mint.key(),
        vault: ctx.accounts.vault.key(),
        corporate_tax_bps: DEFAULT_CORPORATE_TAX_BPS,
        profit_share_bps: DEFAULT_PROFIT_SHARE_BPS,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
