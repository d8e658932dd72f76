use anchor_lang::prelude::*;

use crate::period::{validate_period, QuarterBounds};

#[derive(Accounts)]
pub struct ValidateQuarter {}

/// Returns the inclusive UTC bounds of a quarter
pub fn handler(
    _ctx: Context<ValidateQuarter>,
    period_type: String,
    period_value: String,
) -> Result<QuarterBounds> {
    let quarter = validate_period(&period_type, &period_value)?;
    Ok(quarter.bounds())
}
