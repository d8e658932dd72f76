// PDA seeds
pub const ENGINE_CONFIG_SEED: &[u8] = b"engine_config";
pub const SHAREHOLDER_SEED: &[u8] = b"shareholder";
pub const QUARTER_LEDGER_SEED: &[u8] = b"quarter_ledger";
pub const PROFIT_PERIOD_SEED: &[u8] = b"profit_period";

// Rates
pub const BPS_DENOMINATOR: u64 = 10_000;
pub const DEFAULT_CORPORATE_TAX_BPS: u16 = 2_000; // 20%
pub const DEFAULT_PROFIT_SHARE_BPS: u16 = 4_900;  // 49%
pub const MAX_RATE_BPS: u16 = 10_000;

// Default tier table
pub const TIER_FOUNDER: u8 = 0;
pub const TIER_INVESTOR: u8 = 1;
pub const TIER_CUSTOMER: u8 = 2;
pub const DEFAULT_INVESTOR_CEILING_BPS: u32 = 50_000; // 5x investment
pub const DEFAULT_CUSTOMER_CEILING_BPS: u32 = 21_000; // 210% of owned card value
pub const DEFAULT_SHARE_MULTIPLIER_BPS: u32 = 10_000; // 1x

// Limits
pub const MAX_TIERS: usize = 8;
pub const MAX_SHAREHOLDERS: usize = 20;
pub const PAYOUT_CHANNELS: usize = 5;

// Redistribution
pub const MAX_REDISTRIBUTION_ROUNDS: u8 = 10;
pub const MIN_ROUND_ALLOCATION: u64 = 100;      // minor units
pub const ROUND_PROGRESS_DIVISOR: u64 = 100;    // 1% of the pool still undistributed

// Reporting precision for ProfitPeriod::per_share_rate (minor units per share, scaled)
pub const PER_SHARE_RATE_SCALE: u64 = 1_000_000;

// Period identifiers
pub const PERIOD_TYPE_QUARTER: &str = "quarter";
pub const PERIOD_VALUE_LEN: usize = 7; // "YYYY-Qn"

// Account sizes for zero-copy structs (discriminator included)
// EngineConfig: 5 pubkeys (160) + rollover (8) + tier table (8 * 24 = 192)
//   + tax bps (2) + share bps (2) + shareholder count (2) + bump (1) + padding (1) = 368
pub const ENGINE_CONFIG_SIZE: usize = 8 + 368; // 376 bytes

// Shareholder: owner (32) + shares (8) + investment (8) + asset value (8)
//   + channel payouts (5 * 8) + registered_at (8) + pending distributions (8)
//   + tier/maxout/bump (3) + padding (5) = 120
pub const SHAREHOLDER_SIZE: usize = 8 + 120; // 128 bytes

// QuarterLedger: revenue (8) + expenses (8) + first/last entry (16) + entry count (4)
//   + period value (7) + bump (1) + padding (4) = 48
pub const QUARTER_LEDGER_SIZE: usize = 8 + 48; // 56 bytes

// ProfitPeriod: 12 u64/i64 fields (96) + distributions (20 * 64 = 1280) + generation (4)
//   + count/status/rounds/bump (4) + period value (7) + padding (1) = 1392
pub const PROFIT_PERIOD_SIZE: usize = 8 + 1392; // 1400 bytes
