use anchor_lang::prelude::*;

use crate::{errors::ErrorCode, utils::apply_bps_round_half_up};

/// Profit breakdown of one quarter
///
/// Returned as instruction return data by `calculate_quarterly_profit`, so a
/// loss-making quarter is reported with a negative `net_profit` and a zero pool.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuarterlyProfit {
    pub revenue: u64,
    pub expenses: u64,
    pub net_profit: i64,
    pub tax_amount: u64,
    pub net_profit_after_tax: u64,
    pub distributable_pool: u64,
}

impl QuarterlyProfit {
    /// Derives tax and pool from ledger totals
    /// Both rate applications round half up to the nearest minor unit
    pub fn calculate(
        revenue: u64,
        expenses: u64,
        corporate_tax_bps: u16,
        profit_share_bps: u16,
    ) -> Result<Self> {
        let net_profit = i64::try_from(i128::from(revenue) - i128::from(expenses))
            .map_err(|_| error!(ErrorCode::MathOverflow))?;

        let (tax_amount, net_profit_after_tax, distributable_pool) = if net_profit > 0 {
            let net = net_profit as u64;
            let tax = apply_bps_round_half_up(net, corporate_tax_bps as u64)?;
            let after_tax = net.checked_sub(tax).ok_or(ErrorCode::MathUnderflow)?;
            let pool = apply_bps_round_half_up(after_tax, profit_share_bps as u64)?;
            (tax, after_tax, pool)
        } else {
            (0, 0, 0)
        };

        Ok(Self {
            revenue,
            expenses,
            net_profit,
            tax_amount,
            net_profit_after_tax,
            distributable_pool,
        })
    }

    /// Pool for a distribution run; a loss, break-even or zero pool has nothing to distribute
    pub fn distributable_pool(&self) -> Result<u64> {
        require!(
            self.net_profit > 0 && self.distributable_pool > 0,
            ErrorCode::NothingToDistribute
        );
        Ok(self.distributable_pool)
    }
}
