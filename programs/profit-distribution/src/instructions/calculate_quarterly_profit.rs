use anchor_lang::prelude::*;

use crate::{
    constants::{ENGINE_CONFIG_SEED, QUARTER_LEDGER_SEED},
    errors::ErrorCode,
    events::QuarterlyProfitCalculated,
    period::validate_period,
    profit::QuarterlyProfit,
    state::{EngineConfig, QuarterLedger},
};

#[derive(Accounts)]
#[instruction(period_type: String, period_value: String)]
pub struct CalculateQuarterlyProfit<'info> {
    #[account(
        seeds = [ENGINE_CONFIG_SEED],
        bump = engine_config.load()?.bump
    )]
    pub engine_config: AccountLoader<'info, EngineConfig>,

    /// CHECK: Quarter ledger PDA; still uninitialized when nothing was booked.
    /// Read through `ledger_totals`
    #[account(
        seeds = [QUARTER_LEDGER_SEED, period_value.as_bytes()],
        bump
    )]
    pub quarter_ledger: UncheckedAccount<'info>,
}

/// Revenue and expense totals of a quarter; zero while its ledger PDA is uninitialized
pub fn ledger_totals(ledger: &AccountInfo) -> Result<(u64, u64)> {
    if ledger.data_is_empty() && *ledger.owner == anchor_lang::system_program::ID {
        return Ok((0, 0));
    }
    require_keys_eq!(*ledger.owner, crate::ID, ErrorCode::InvalidLedgerAccount);

    let data = ledger.try_borrow_data()?;
    let ledger = QuarterLedger::try_deserialize(&mut &data[..])?;
    Ok((ledger.revenue, ledger.expenses))
}

/// Computes the quarter's profit breakdown without distributing it
/// A loss is reported, not rejected
pub fn handler(
    ctx: Context<CalculateQuarterlyProfit>,
    period_type: String,
    period_value: String,
) -> Result<QuarterlyProfit> {
    validate_period(&period_type, &period_value)?;

    let (revenue, expenses) = ledger_totals(&ctx.accounts.quarter_ledger)?;
    let (corporate_tax_bps, profit_share_bps) = {
        let engine_config = ctx.accounts.engine_config.load()?;
        (engine_config.corporate_tax_bps, engine_config.profit_share_bps)
    };

    let profit =
        QuarterlyProfit::calculate(revenue, expenses, corporate_tax_bps, profit_share_bps)?;

    emit!(QuarterlyProfitCalculated {
        period_value,
        revenue,
        expenses,
        net_profit: profit.net_profit,
        distributable_pool: profit.distributable_pool,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(profit)
}
