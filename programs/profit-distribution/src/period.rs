use anchor_lang::prelude::*;

use crate::{
    constants::{PERIOD_TYPE_QUARTER, PERIOD_VALUE_LEN},
    errors::ErrorCode,
};

const SECONDS_PER_DAY: i64 = 86_400;

/// Inclusive UTC bounds of a quarter, in unix seconds
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuarterBounds {
    pub start: i64,
    pub end: i64,
}

impl QuarterBounds {
    pub fn contains(&self, timestamp: i64) -> bool {
        (self.start..=self.end).contains(&timestamp)
    }
}

/// A validated "YYYY-Qn" period
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quarter {
    pub year: u16,
    pub quarter: u8,
}

impl Quarter {
    /// Parses a "YYYY-Q[1-4]" period value
    pub fn parse(value: &str) -> Result<Self> {
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == PERIOD_VALUE_LEN
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[4] == b'-'
            && bytes[5] == b'Q'
            && (b'1'..=b'4').contains(&bytes[6]);

        if !well_formed {
            msg!("Invalid period value: {:?}", value);
            return err!(ErrorCode::InvalidPeriodValue);
        }

        let year = bytes[..4]
            .iter()
            .fold(0u16, |acc, digit| acc * 10 + u16::from(digit - b'0'));

        Ok(Self {
            year,
            quarter: bytes[6] - b'0',
        })
    }

    /// Canonical "YYYY-Qn" bytes, used as PDA seed and stored on accounts
    pub fn key(&self) -> [u8; PERIOD_VALUE_LEN] {
        let mut key = *b"0000-Q0";
        let mut year = self.year;
        for slot in key[..4].iter_mut().rev() {
            *slot = b'0' + (year % 10) as u8;
            year /= 10;
        }
        key[6] = b'0' + self.quarter;
        key
    }

    /// First second of the quarter through the last second of its third month
    pub fn bounds(&self) -> QuarterBounds {
        let year = i64::from(self.year);
        let first_month = u32::from(self.quarter) * 3 - 2;
        let start = days_from_civil(year, first_month, 1) * SECONDS_PER_DAY;
        let next_start = if self.quarter == 4 {
            days_from_civil(year + 1, 1, 1)
        } else {
            days_from_civil(year, first_month + 3, 1)
        } * SECONDS_PER_DAY;

        QuarterBounds {
            start,
            end: next_start - 1,
        }
    }
}

/// Validates a (period type, period value) pair
/// Only quarterly periods are supported
pub fn validate_period(period_type: &str, period_value: &str) -> Result<Quarter> {
    if period_type != PERIOD_TYPE_QUARTER {
        msg!("Unsupported period type: {:?}", period_type);
        return err!(ErrorCode::InvalidPeriodType);
    }
    Quarter::parse(period_value)
}

/// Days since 1970-01-01 for a proleptic Gregorian date
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
