use anchor_lang::prelude::*;

use crate::{
    constants::MAX_TIERS,
    errors::ErrorCode,
    state::TierPolicy,
    utils::apply_bps_floor,
};

/// How a tier's payout ceiling is derived
///
/// `None` enforces no ceiling, even when the tier lists a nominal multiplier
/// for reporting (see `TierPolicy::has_unenforced_nominal_ceiling`).
/// Stored on `TierPolicy` as `kind as u8`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CeilingKind {
    None,
    Unlimited,
    MultipleOfInvestment,
    PercentOfAssetValue,
}

impl TryFrom<u8> for CeilingKind {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Unlimited),
            2 => Ok(Self::MultipleOfInvestment),
            3 => Ok(Self::PercentOfAssetValue),
            _ => err!(ErrorCode::InvalidTierPolicy),
        }
    }
}

/// Maximum cumulative payout of one account
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ceiling {
    Unlimited,
    Finite(u64),
}

/// Input for configuring one tier
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct TierPolicyInput {
    pub tier: u8,
    pub ceiling_kind: CeilingKind,
    pub ceiling_bps: u32,
    pub nominal_ceiling_bps: u32,
    pub share_multiplier_bps: u32,
    pub max_shares: u64,
    pub share_exempt: bool,
}

impl TierPolicyInput {
    pub fn validate(&self) -> Result<()> {
        require!((self.tier as usize) < MAX_TIERS, ErrorCode::InvalidTier);
        require!(self.share_multiplier_bps > 0, ErrorCode::InvalidTierPolicy);

        match self.ceiling_kind {
            CeilingKind::MultipleOfInvestment | CeilingKind::PercentOfAssetValue => {
                require!(self.ceiling_bps > 0, ErrorCode::InvalidTierPolicy)
            }
            CeilingKind::Unlimited | CeilingKind::None => {
                require!(self.ceiling_bps == 0, ErrorCode::InvalidTierPolicy)
            }
        }

        Ok(())
    }

    pub fn to_policy(&self) -> TierPolicy {
        TierPolicy {
            max_shares: self.max_shares,
            ceiling_bps: self.ceiling_bps,
            nominal_ceiling_bps: self.nominal_ceiling_bps,
            share_multiplier_bps: self.share_multiplier_bps,
            tier: self.tier,
            ceiling_kind: self.ceiling_kind as u8,
            share_exempt: self.share_exempt as u8,
            configured: 1,
        }
    }
}

impl TierPolicy {
    pub fn kind(&self) -> Result<CeilingKind> {
        CeilingKind::try_from(self.ceiling_kind)
    }

    pub fn is_share_exempt(&self) -> bool {
        self.share_exempt != 0
    }

    /// A descriptive multiplier exists but nothing enforces it
    pub fn has_unenforced_nominal_ceiling(&self) -> bool {
        self.ceiling_kind == CeilingKind::None as u8 && self.nominal_ceiling_bps > 0
    }

    /// Resolves the payout ceiling from the account's current attributes
    /// Multipliers are floored toward zero
    pub fn resolve_ceiling(&self, investment_amount: u64, owned_asset_value: u64) -> Result<Ceiling> {
        let ceiling = match self.kind()? {
            CeilingKind::None | CeilingKind::Unlimited => Ceiling::Unlimited,
            CeilingKind::MultipleOfInvestment => Ceiling::Finite(apply_bps_floor(
                investment_amount,
                self.ceiling_bps as u64,
            )?),
            CeilingKind::PercentOfAssetValue => Ceiling::Finite(apply_bps_floor(
                owned_asset_value,
                self.ceiling_bps as u64,
            )?),
        };
        Ok(ceiling)
    }

    /// Shares actually credited for a share award, and whether the tier cap cut it short
    pub fn award(&self, current_shares: u64, base_shares: u64) -> Result<(u64, bool)> {
        let multiplied = apply_bps_floor(base_shares, self.share_multiplier_bps as u64)?;

        if self.max_shares == 0 {
            current_shares
                .checked_add(multiplied)
                .ok_or(ErrorCode::MathOverflow)?;
            return Ok((multiplied, false));
        }

        let room = self.max_shares.saturating_sub(current_shares);
        Ok((multiplied.min(room), multiplied > room))
    }
}

/// Default tier table installed at engine initialization
pub fn default_tier_policies() -> [TierPolicy; MAX_TIERS] {
    use crate::constants::{
        DEFAULT_CUSTOMER_CEILING_BPS, DEFAULT_INVESTOR_CEILING_BPS, DEFAULT_SHARE_MULTIPLIER_BPS,
        TIER_CUSTOMER, TIER_FOUNDER, TIER_INVESTOR,
    };

    let mut policies = [TierPolicy::default(); MAX_TIERS];
    let defaults = [
        (TIER_FOUNDER, CeilingKind::Unlimited, 0),
        (TIER_INVESTOR, CeilingKind::MultipleOfInvestment, DEFAULT_INVESTOR_CEILING_BPS),
        (TIER_CUSTOMER, CeilingKind::PercentOfAssetValue, DEFAULT_CUSTOMER_CEILING_BPS),
    ];
    for (tier, ceiling_kind, ceiling_bps) in defaults {
        policies[tier as usize] = TierPolicy {
            ceiling_bps,
            share_multiplier_bps: DEFAULT_SHARE_MULTIPLIER_BPS,
            tier,
            ceiling_kind: ceiling_kind as u8,
            configured: 1,
            ..TierPolicy::default()
        };
    }
    policies
}
