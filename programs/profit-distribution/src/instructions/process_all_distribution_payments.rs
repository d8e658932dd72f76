use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::{
    constants::{ENGINE_CONFIG_SEED, PROFIT_PERIOD_SEED},
    errors::ErrorCode,
    events::{DistributionPaid, DistributionPaymentFailed, DistributionPaymentsProcessed},
    state::{EngineConfig, PaymentStatus, ProfitPeriod, Shareholder},
    utils::{inspect_shareholder_token_account, pay_from_vault, PaymentFailure},
};

#[derive(Accounts)]
pub struct ProcessAllDistributionPayments<'info> {
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
        constraint = vault.key() == engine_config.load()?.vault @ ErrorCode::InvalidVault
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        constraint = mint.key() == engine_config.load()?.mint @ ErrorCode::ShareholderATAWrongMint
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    pub authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    // remaining_accounts: (shareholder, token account) per pending distribution, in index order
}

/// Pays every pending distribution of a period
///
/// Unpayable distributions stay pending and are reported through
/// `DistributionPaymentFailed`; the rest are paid. Returns the amount paid.
pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ProcessAllDistributionPayments<'info>>,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let period_key = ctx.accounts.profit_period.key();
    let mint_key = ctx.accounts.mint.key();

    // Phase 1: Read pending distributions and DROP borrow before CPIs
    let (pending, bump, tier_policies) = {
        let period = ctx.accounts.profit_period.load()?;
        require!(period.is_completed(), ErrorCode::PeriodNotCompleted);

        let pending: Vec<(usize, Pubkey, u64)> = period
            .active_distributions()
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_pending())
            .map(|(i, d)| (i, d.shareholder, d.amount))
            .collect();

        let engine_config = ctx.accounts.engine_config.load()?;
        (pending, engine_config.bump, engine_config.tier_policies)
    };

    require!(
        ctx.remaining_accounts.len() >= pending.len() * 2,
        ErrorCode::InsufficientRemainingAccounts
    );

    let seeds = &[ENGINE_CONFIG_SEED, &[bump]];
    let signer_seeds = &[&seeds[..]];

    // Phase 2: Pay what can be paid, collect the rest
    let mut vault_balance = ctx.accounts.vault.amount;
    let mut paid: Vec<usize> = Vec::with_capacity(pending.len());
    let mut total_paid = 0u64;
    let mut failed_count = 0u8;

    for (slot, (index, shareholder_key, amount)) in pending.iter().enumerate() {
        let shareholder_info = &ctx.remaining_accounts[slot * 2];
        let token_account_info = &ctx.remaining_accounts[slot * 2 + 1];

        require!(
            shareholder_info.key() == *shareholder_key,
            ErrorCode::InvalidShareholderAccount
        );
        let shareholder = AccountLoader::<'info, Shareholder>::try_from(shareholder_info)
            .map_err(|_| ErrorCode::InvalidShareholderAccount)?;
        let owner = shareholder.load()?.owner;

        let failure = inspect_shareholder_token_account(token_account_info, &owner, &mint_key)
            .or((*amount > vault_balance).then_some(PaymentFailure::InsufficientVaultBalance));

        if let Some(reason) = failure {
            #[cfg(feature = "verbose")]
            msg!(
                "Distribution {} to {} not paid: {:?}",
                index,
                shareholder_key,
                reason
            );

            emit!(DistributionPaymentFailed {
                period: period_key,
                index: *index as u8,
                shareholder: *shareholder_key,
                amount: *amount,
                reason: reason as u8,
                timestamp: now,
            });
            failed_count += 1;
            continue;
        }

        if *amount > 0 {
            pay_from_vault(
                token_account_info,
                *amount,
                &ctx.accounts.mint,
                &ctx.accounts.vault,
                &ctx.accounts.engine_config.to_account_info(),
                &ctx.accounts.token_program,
                signer_seeds,
            )?;
        }

        {
            let holder = &mut shareholder.load_mut()?;
            let policy = tier_policies
                .get(holder.tier as usize)
                .filter(|policy| policy.configured != 0)
                .ok_or(ErrorCode::InvalidTier)?;
            holder.credit_distribution(*amount, policy)?;
        }

        vault_balance -= amount;
        total_paid = total_paid.checked_add(*amount).ok_or(ErrorCode::MathOverflow)?;
        paid.push(*index);

        emit!(DistributionPaid {
            period: period_key,
            index: *index as u8,
            shareholder: *shareholder_key,
            amount: *amount,
            timestamp: now,
        });
    }

    // Phase 3: Mark paid entries
    {
        let period = &mut ctx.accounts.profit_period.load_mut()?;
        for index in &paid {
            let entry = &mut period.distributions[*index];
            entry.payment_status = PaymentStatus::Paid as u8;
            entry.paid_at = now;
        }
        period.total_paid = period
            .total_paid
            .checked_add(total_paid)
            .ok_or(ErrorCode::MathOverflow)?;
    }

    emit!(DistributionPaymentsProcessed {
        period: period_key,
        paid_count: paid.len() as u8,
        failed_count,
        total_paid,
        timestamp: now,
    });

    Ok(total_paid)
}
