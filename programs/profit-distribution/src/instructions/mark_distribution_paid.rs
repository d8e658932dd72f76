use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{ENGINE_CONFIG_SEED, PROFIT_PERIOD_SEED, SHAREHOLDER_SEED},
    errors::ErrorCode,
    events::DistributionPaid,
    state::{DistributionEntry, EngineConfig, PaymentStatus, ProfitPeriod, Shareholder},
    utils::{inspect_shareholder_token_account, pay_from_vault},
};

#[derive(Accounts)]
pub struct MarkDistributionPaid<'info> {
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

    /// CHECK: Validated in handler (owner, mint, frozen state)
    #[account(mut)]
    pub shareholder_token_account: AccountInfo<'info>,

    #[account(
        mut,
        constraint = vault.key() == engine_config.load()?.vault @ ErrorCode::InvalidVault
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        constraint = mint.key() == engine_config.load()?.mint @ ErrorCode::ShareholderATAWrongMint
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    pub authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Rejects any distribution that is not pending
pub fn ensure_payable(entry: &DistributionEntry) -> Result<()> {
    require!(!entry.is_paid(), ErrorCode::DistributionAlreadyPaid);
    require!(!entry.is_cancelled(), ErrorCode::DistributionCancelled);
    Ok(())
}

/// Pays one distribution from the vault and marks it paid
/// The period account's write lock makes check-then-set atomic per distribution
pub fn handler(ctx: Context<MarkDistributionPaid>, index: u8) -> Result<()> {
    // Phase 1: Read and check the distribution, DROP borrow before CPI
    let (entry, bump) = {
        let period = ctx.accounts.profit_period.load()?;
        require!(period.is_completed(), ErrorCode::PeriodNotCompleted);
        let entry = *period
            .active_distributions()
            .get(index as usize)
            .ok_or(ErrorCode::DistributionNotFound)?;
        (entry, ctx.accounts.engine_config.load()?.bump)
    };

    ensure_payable(&entry)?;
    require!(
        entry.shareholder == ctx.accounts.shareholder.key(),
        ErrorCode::InvalidShareholderAccount
    );

    let owner = ctx.accounts.shareholder.load()?.owner;
    if let Some(failure) = inspect_shareholder_token_account(
        &ctx.accounts.shareholder_token_account,
        &owner,
        &ctx.accounts.mint.key(),
    ) {
        return Err(ErrorCode::from(failure).into());
    }
    require!(
        ctx.accounts.vault.amount >= entry.amount,
        ErrorCode::InsufficientVaultBalance
    );

    // Phase 2: Transfer - no borrow held
    if entry.amount > 0 {
        let seeds = &[ENGINE_CONFIG_SEED, &[bump]];
        let signer_seeds = &[&seeds[..]];
        pay_from_vault(
            &ctx.accounts.shareholder_token_account,
            entry.amount,
            &ctx.accounts.mint,
            &ctx.accounts.vault,
            &ctx.accounts.engine_config.to_account_info(),
            &ctx.accounts.token_program,
            signer_seeds,
        )?;
    }

    // Phase 3: Write back payment status and payout totals
    let now = Clock::get()?.unix_timestamp;
    {
        let period = &mut ctx.accounts.profit_period.load_mut()?;
        let slot = &mut period.distributions[index as usize];
        slot.payment_status = PaymentStatus::Paid as u8;
        slot.paid_at = now;
        period.total_paid = period
            .total_paid
            .checked_add(entry.amount)
            .ok_or(ErrorCode::MathOverflow)?;
    }
    {
        let engine_config = ctx.accounts.engine_config.load()?;
        let shareholder = &mut ctx.accounts.shareholder.load_mut()?;
        let policy = engine_config
            .tier_policy(shareholder.tier)
            .ok_or(ErrorCode::InvalidTier)?;
        shareholder.credit_distribution(entry.amount, policy)?;
    }

    emit!(DistributionPaid {
        period: ctx.accounts.profit_period.key(),
        index,
        shareholder: entry.shareholder,
        amount: entry.amount,
        timestamp: now,
    });

    Ok(())
}
