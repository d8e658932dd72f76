#![allow(ambiguous_glob_reexports)]

pub mod accept_engine_authority;
pub mod award_shares;
pub mod calculate_quarterly_profit;
pub mod cancel_distribution;
pub mod initialize_engine;
pub mod mark_distribution_paid;
pub mod process_all_distribution_payments;
pub mod process_quarterly_distribution;
pub mod record_ledger_entry;
pub mod record_payout;
pub mod register_shareholder;
pub mod set_tier_policy;
pub mod transfer_engine_authority;
pub mod update_engine_config;
pub mod update_shareholder;
pub mod validate_quarter;

pub use accept_engine_authority::*;
pub use award_shares::*;
pub use calculate_quarterly_profit::*;
pub use cancel_distribution::*;
pub use initialize_engine::*;
pub use mark_distribution_paid::*;
pub use process_all_distribution_payments::*;
pub use process_quarterly_distribution::*;
pub use record_ledger_entry::*;
pub use record_payout::*;
pub use register_shareholder::*;
pub use set_tier_policy::*;
pub use transfer_engine_authority::*;
pub use update_engine_config::*;
pub use update_shareholder::*;
pub use validate_quarter::*;
