use anchor_lang::prelude::*;
use anchor_spl::{
    token,
    token_2022::{self, spl_token_2022::state::AccountState},
    token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::{constants::BPS_DENOMINATOR, errors::ErrorCode};

/// Apply a basis-point rate, rounding half up to the nearest minor unit
pub fn apply_bps_round_half_up(amount: u64, bps: u64) -> Result<u64> {
    (amount as u128)
        .checked_mul(bps as u128)
        .and_then(|v| v.checked_add(BPS_DENOMINATOR as u128 / 2))
        .map(|v| v / BPS_DENOMINATOR as u128)
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| error!(ErrorCode::MathOverflow))
}

/// Apply a basis-point multiplier, flooring toward zero
pub fn apply_bps_floor(amount: u64, bps: u64) -> Result<u64> {
    (amount as u128)
        .checked_mul(bps as u128)
        .map(|v| v / BPS_DENOMINATOR as u128)
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| error!(ErrorCode::MathOverflow))
}

/// floor(amount × part / whole); zero when `whole` is zero
pub fn pro_rata_floor(amount: u64, part: u64, whole: u64) -> Result<u64> {
    if whole == 0 {
        return Ok(0);
    }
    // Quotient fits u64 whenever part <= whole
    u64::try_from((amount as u128) * (part as u128) / (whole as u128))
        .map_err(|_| error!(ErrorCode::MathOverflow))
}

/// True while an account still has the zeroed discriminator left by
/// `init_if_needed` on a freshly created zero-copy account
pub fn is_freshly_created(account_info: &AccountInfo) -> Result<bool> {
    let data = account_info.try_borrow_data()?;
    Ok(data.len() >= 8 && data[..8].iter().all(|b| *b == 0))
}

/// Reason a payment to a shareholder token account cannot be made
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PaymentFailure {
    MissingTokenAccount = 0,
    FrozenTokenAccount = 1,
    InvalidTokenAccount = 2,
    WrongOwner = 3,
    WrongMint = 4,
    InsufficientVaultBalance = 5,
}

impl From<PaymentFailure> for ErrorCode {
    fn from(failure: PaymentFailure) -> Self {
        match failure {
            PaymentFailure::MissingTokenAccount => ErrorCode::ShareholderATADoesNotExist,
            PaymentFailure::FrozenTokenAccount => ErrorCode::ShareholderATAFrozen,
            PaymentFailure::InvalidTokenAccount => ErrorCode::ShareholderATAInvalid,
            PaymentFailure::WrongOwner => ErrorCode::ShareholderATAWrongOwner,
            PaymentFailure::WrongMint => ErrorCode::ShareholderATAWrongMint,
            PaymentFailure::InsufficientVaultBalance => ErrorCode::InsufficientVaultBalance,
        }
    }
}

/// Checks that a shareholder token account can receive a payment
/// Never errors; callers decide whether a failure aborts or is collected
pub fn inspect_shareholder_token_account(
    token_account_info: &AccountInfo,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Option<PaymentFailure> {
    if token_account_info.data_is_empty() {
        return Some(PaymentFailure::MissingTokenAccount);
    }

    // Must be owned by token program (SPL Token or Token-2022)
    let valid_program =
        token_account_info.owner == &token::ID || token_account_info.owner == &token_2022::ID;
    if !valid_program {
        return Some(PaymentFailure::InvalidTokenAccount);
    }

    let Ok(token_account) =
        TokenAccount::try_deserialize(&mut &token_account_info.data.borrow()[..])
    else {
        return Some(PaymentFailure::InvalidTokenAccount);
    };

    if token_account.owner != *owner {
        return Some(PaymentFailure::WrongOwner);
    }
    if token_account.mint != *mint {
        return Some(PaymentFailure::WrongMint);
    }
    if token_account.state == AccountState::Frozen {
        return Some(PaymentFailure::FrozenTokenAccount);
    }

    None
}

/// Transfers `amount` from the engine vault to a shareholder token account
/// The token account must have passed `inspect_shareholder_token_account`
pub fn pay_from_vault<'info>(
    shareholder_token_account: &AccountInfo<'info>,
    amount: u64,
    mint: &InterfaceAccount<'info, Mint>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    engine_config_info: &AccountInfo<'info>,
    token_program: &Interface<'info, TokenInterface>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let cpi_accounts = TransferChecked {
        from: vault.to_account_info(),
        mint: mint.to_account_info(),
        to: shareholder_token_account.clone(),
        authority: engine_config_info.clone(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token_interface::transfer_checked(cpi_ctx, amount, mint.decimals)?;

    Ok(())
}
