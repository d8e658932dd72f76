use anchor_lang::prelude::*;

use crate::{
    constants::{ENGINE_CONFIG_SEED, QUARTER_LEDGER_SEED, QUARTER_LEDGER_SIZE},
    errors::ErrorCode,
    events::LedgerEntryRecorded,
    period::Quarter,
    state::{EngineConfig, LedgerEntryKind, QuarterLedger},
    utils::is_freshly_created,
};

#[derive(Accounts)]
#[instruction(period_value: String)]
pub struct RecordLedgerEntry<'info> {
    #[account(
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.load()?.bump,
        constraint = engine_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    #[account(
        init_if_needed,
        payer = authority,
        space = QUARTER_LEDGER_SIZE,
        seeds = [QUARTER_LEDGER_SEED, period_value.as_bytes()],
        bump
    )]
    pub quarter_ledger: AccountLoader<'info, QuarterLedger>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Books an income or expense movement into its quarter's totals
pub fn handler(
    ctx: Context<RecordLedgerEntry>,
    period_value: String,
    kind: LedgerEntryKind,
    amount: u64,
    entry_timestamp: i64,
) -> Result<()> {
    let quarter = Quarter::parse(&period_value)?;
    require!(amount > 0, ErrorCode::ZeroAmount);
    require!(
        quarter.bounds().contains(entry_timestamp),
        ErrorCode::TimestampOutsidePeriod
    );

    let fresh = is_freshly_created(&ctx.accounts.quarter_ledger.to_account_info())?;
    let ledger = &mut if fresh {
        let mut ledger = ctx.accounts.quarter_ledger.load_init()?;
        ledger.period_value = quarter.key();
        ledger.first_entry_at = entry_timestamp;
        ledger.last_entry_at = entry_timestamp;
        ledger.bump = ctx.bumps.quarter_ledger;
        ledger
    } else {
        ctx.accounts.quarter_ledger.load_mut()?
    };

    match kind {
        LedgerEntryKind::Income => {
            ledger.revenue = ledger.revenue.checked_add(amount).ok_or(ErrorCode::MathOverflow)?;
        }
        LedgerEntryKind::Expense => {
            ledger.expenses = ledger.expenses.checked_add(amount).ok_or(ErrorCode::MathOverflow)?;
        }
    }
    ledger.first_entry_at = ledger.first_entry_at.min(entry_timestamp);
    ledger.last_entry_at = ledger.last_entry_at.max(entry_timestamp);
    ledger.entry_count = ledger.entry_count.checked_add(1).ok_or(ErrorCode::MathOverflow)?;

    emit!(LedgerEntryRecorded {
        ledger: ctx.accounts.quarter_ledger.key(),
        period_value,
        is_income: kind == LedgerEntryKind::Income,
        amount,
        entry_timestamp,
        revenue: ledger.revenue,
        expenses: ledger.expenses,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
