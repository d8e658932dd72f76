use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Validation
    #[msg("Period type must be \"quarter\"")]
    InvalidPeriodType,

    #[msg("Period value must match YYYY-Q[1-4]")]
    InvalidPeriodValue,

    #[msg("Timestamp is outside the quarter")]
    TimestampOutsidePeriod,

    #[msg("Rate must be between 0 and 10000 bps")]
    InvalidRate,

    #[msg("Tier is out of range or not configured")]
    InvalidTier,

    #[msg("Tier policy parameters are inconsistent with its ceiling kind")]
    InvalidTierPolicy,

    #[msg("Address cannot be zero")]
    ZeroAddress,

    #[msg("Amount cannot be zero")]
    ZeroAmount,

    #[msg("Payout channel cannot be recorded directly")]
    InvalidPayoutChannel,

    // State
    #[msg("Period already completed; reprocessing requires force")]
    PeriodAlreadyCompleted,

    #[msg("Net profit is not positive; nothing to distribute")]
    NothingToDistribute,

    #[msg("No eligible shares in this period")]
    NoEligibleShares,

    #[msg("Every registered shareholder must be supplied exactly once")]
    IncompleteShareholderSet,

    #[msg("Duplicate shareholder account")]
    DuplicateShareholder,

    #[msg("Invalid shareholder account")]
    InvalidShareholderAccount,

    #[msg("Quarter ledger account is not owned by this program")]
    InvalidLedgerAccount,

    #[msg("Shareholder registry is full")]
    TooManyShareholders,

    #[msg("Period has not been processed")]
    PeriodNotCompleted,

    // Conflict
    #[msg("Distribution already paid")]
    DistributionAlreadyPaid,

    #[msg("Distribution was cancelled")]
    DistributionCancelled,

    #[msg("Period has paid distributions and cannot be reprocessed")]
    PaidDistributionsExist,

    #[msg("Payout would exceed the shareholder's ceiling")]
    PayoutExceedsCeiling,

    #[msg("Vault balance is insufficient for this payment")]
    InsufficientVaultBalance,

    // Not found
    #[msg("Distribution not found")]
    DistributionNotFound,

    // Token accounts
    #[msg("Shareholder token account does not exist")]
    ShareholderATADoesNotExist,

    #[msg("Shareholder token account is invalid")]
    ShareholderATAInvalid,

    #[msg("Shareholder token account has wrong owner")]
    ShareholderATAWrongOwner,

    #[msg("Shareholder token account has wrong mint")]
    ShareholderATAWrongMint,

    #[msg("Shareholder token account is frozen")]
    ShareholderATAFrozen,

    #[msg("Invalid vault account")]
    InvalidVault,

    #[msg("Not enough accounts provided in remaining_accounts")]
    InsufficientRemainingAccounts,

    // Authority
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("No pending authority transfer")]
    NoPendingTransfer,

    // Math
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,
}
