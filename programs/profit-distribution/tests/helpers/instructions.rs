//! Instruction builders for Mollusk tests
//!
//! NOTE: This is written for mollusk-svm 0.5.1 with solana-sdk 2.2
//! All imports from solana_sdk::*, not modular crates

use {
    solana_sdk::{
        instruction::{AccountMeta, Instruction},
        pubkey::Pubkey,
        system_program,
    },
    spl_associated_token_account,
};

/// Program ID - must match lib.rs
pub const PROGRAM_ID: Pubkey = solana_sdk::pubkey!("BAScuFPyhsFjRG11zpjfgcrNSuwv3q8LNv5SSQjL8QQe");

// Anchor discriminators (first 8 bytes of sha256("global:function_name"))
// These must match the IDL/program
pub const DISCRIMINATOR_INITIALIZE_ENGINE: [u8; 8] = [0x11, 0x9e, 0x99, 0xd7, 0x77, 0xf2, 0x9c, 0x6b];
pub const DISCRIMINATOR_UPDATE_ENGINE_CONFIG: [u8; 8] = [0x3e, 0x9f, 0x20, 0xe9, 0x89, 0xa3, 0xe1, 0x2a];
pub const DISCRIMINATOR_TRANSFER_ENGINE_AUTHORITY: [u8; 8] = [0xbe, 0x38, 0xeb, 0xc4, 0x62, 0x2a, 0xe3, 0xaf];
pub const DISCRIMINATOR_ACCEPT_ENGINE_AUTHORITY: [u8; 8] = [0x85, 0xd9, 0xda, 0x38, 0x92, 0x5c, 0xff, 0xb4];
pub const DISCRIMINATOR_SET_TIER_POLICY: [u8; 8] = [0x96, 0x65, 0x93, 0xd5, 0xf0, 0xe5, 0xb1, 0xf1];
pub const DISCRIMINATOR_REGISTER_SHAREHOLDER: [u8; 8] = [0x06, 0x35, 0xc0, 0x54, 0xdd, 0xf9, 0xf9, 0xb5];
pub const DISCRIMINATOR_UPDATE_SHAREHOLDER: [u8; 8] = [0x8b, 0xa4, 0x20, 0x4e, 0xa7, 0x08, 0xbd, 0xa4];
pub const DISCRIMINATOR_AWARD_SHARES: [u8; 8] = [0x3b, 0x72, 0x45, 0xae, 0x57, 0x6b, 0x9e, 0x7d];
pub const DISCRIMINATOR_RECORD_PAYOUT: [u8; 8] = [0xe3, 0xa4, 0xd5, 0x36, 0x45, 0xac, 0x1f, 0xd8];
pub const DISCRIMINATOR_RECORD_LEDGER_ENTRY: [u8; 8] = [0xca, 0xcc, 0xb2, 0xc0, 0x34, 0xbd, 0xe3, 0xb5];
pub const DISCRIMINATOR_VALIDATE_QUARTER: [u8; 8] = [0x64, 0x88, 0x2b, 0x3e, 0x18, 0x02, 0x2a, 0x5d];
pub const DISCRIMINATOR_CALCULATE_QUARTERLY_PROFIT: [u8; 8] = [0xe7, 0xf0, 0x84, 0x75, 0xd8, 0x08, 0x5a, 0xb1];
pub const DISCRIMINATOR_PROCESS_QUARTERLY_DISTRIBUTION: [u8; 8] = [0xea, 0x91, 0x12, 0xe9, 0x2d, 0xae, 0xfc, 0x39];
pub const DISCRIMINATOR_MARK_DISTRIBUTION_PAID: [u8; 8] = [0x7e, 0x79, 0x12, 0x23, 0xca, 0xed, 0x66, 0x4a];
pub const DISCRIMINATOR_CANCEL_DISTRIBUTION: [u8; 8] = [0x33, 0x65, 0x16, 0x1f, 0x43, 0x33, 0x4a, 0x80];
pub const DISCRIMINATOR_PROCESS_ALL_DISTRIBUTION_PAYMENTS: [u8; 8] = [0x7c, 0x2a, 0xce, 0x38, 0xed, 0xa1, 0x27, 0x88];

// Borsh variant indices
pub const LEDGER_INCOME: u8 = 0;
pub const LEDGER_EXPENSE: u8 = 1;

/// Tier policy input, serialized field by field in TierPolicyInput order
#[derive(Clone, Debug)]
pub struct TierPolicyArgs {
    pub tier: u8,
    pub ceiling_kind: u8,
    pub ceiling_bps: u32,
    pub nominal_ceiling_bps: u32,
    pub share_multiplier_bps: u32,
    pub max_shares: u64,
    pub share_exempt: bool,
}

/// Derive engine config PDA
pub fn derive_engine_config() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"engine_config"], &PROGRAM_ID)
}

/// Derive shareholder PDA
pub fn derive_shareholder(owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"shareholder", owner.as_ref()], &PROGRAM_ID)
}

/// Derive quarter ledger PDA
pub fn derive_quarter_ledger(period_value: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"quarter_ledger", period_value.as_bytes()], &PROGRAM_ID)
}

/// Derive profit period PDA
pub fn derive_profit_period(period_value: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"profit_period", period_value.as_bytes()], &PROGRAM_ID)
}

/// Derive vault address (ATA owned by engine_config)
pub fn derive_vault(engine_config: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(engine_config, mint)
}

/// Derive program data PDA for BPF upgradeable loader
pub fn derive_program_data() -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_ID.as_ref()],
        &solana_sdk::bpf_loader_upgradeable::id(),
    )
}

fn push_string(data: &mut Vec<u8>, value: &str) {
    data.extend_from_slice(&(value.len() as u32).to_le_bytes());
    data.extend_from_slice(value.as_bytes());
}

/// Build initialize_engine instruction
///
/// Accounts:
/// 0. engine_config (writable) - PDA to initialize
/// 1. authority (writable, signer) - Must be upgrade authority
/// 2. program_data - BPF loader program data
/// 3. mint
/// 4. vault (writable) - init
/// 5. token_program
/// 6. associated_token_program
/// 7. system_program
pub fn build_initialize_engine(
    engine_config: Pubkey,
    authority: Pubkey,
    program_data: Pubkey,
    mint: Pubkey,
    vault: Pubkey,
    treasury: Pubkey,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 32);
    data.extend_from_slice(&DISCRIMINATOR_INITIALIZE_ENGINE);
    data.extend_from_slice(&treasury.to_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(engine_config, false),
            AccountMeta::new(authority, true),
            AccountMeta::new_readonly(program_data, false),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    }
}

/// Build update_engine_config instruction
///
/// Accounts:
/// 0. engine_config (writable)
/// 1. authority (signer)
pub fn build_update_engine_config(
    engine_config: Pubkey,
    authority: Pubkey,
    corporate_tax_bps: u16,
    profit_share_bps: u16,
    treasury: Pubkey,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 2 + 2 + 32);
    data.extend_from_slice(&DISCRIMINATOR_UPDATE_ENGINE_CONFIG);
    data.extend_from_slice(&corporate_tax_bps.to_le_bytes());
    data.extend_from_slice(&profit_share_bps.to_le_bytes());
    data.extend_from_slice(&treasury.to_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(engine_config, false),
            AccountMeta::new_readonly(authority, true),
        ],
        data,
    }
}

/// Build transfer_engine_authority instruction
///
/// Accounts:
/// 0. engine_config (writable)
/// 1. authority (signer)
pub fn build_transfer_engine_authority(
    engine_config: Pubkey,
    authority: Pubkey,
    new_authority: Pubkey,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 32);
    data.extend_from_slice(&DISCRIMINATOR_TRANSFER_ENGINE_AUTHORITY);
    data.extend_from_slice(&new_authority.to_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(engine_config, false),
            AccountMeta::new_readonly(authority, true),
        ],
        data,
    }
}

/// Build accept_engine_authority instruction
///
/// Accounts:
/// 0. engine_config (writable)
/// 1. new_authority (signer)
pub fn build_accept_engine_authority(engine_config: Pubkey, new_authority: Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(engine_config, false),
            AccountMeta::new_readonly(new_authority, true),
        ],
        data: DISCRIMINATOR_ACCEPT_ENGINE_AUTHORITY.to_vec(),
    }
}

/// Build set_tier_policy instruction
///
/// Accounts:
/// 0. engine_config (writable)
/// 1. authority (signer)
pub fn build_set_tier_policy(
    engine_config: Pubkey,
    authority: Pubkey,
    policy: &TierPolicyArgs,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 23);
    data.extend_from_slice(&DISCRIMINATOR_SET_TIER_POLICY);
    data.push(policy.tier);
    data.push(policy.ceiling_kind);
    data.extend_from_slice(&policy.ceiling_bps.to_le_bytes());
    data.extend_from_slice(&policy.nominal_ceiling_bps.to_le_bytes());
    data.extend_from_slice(&policy.share_multiplier_bps.to_le_bytes());
    data.extend_from_slice(&policy.max_shares.to_le_bytes());
    data.push(policy.share_exempt as u8);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(engine_config, false),
            AccountMeta::new_readonly(authority, true),
        ],
        data,
    }
}

/// Build register_shareholder instruction
///
/// Accounts:
/// 0. engine_config (writable)
/// 1. shareholder (writable) - init
/// 2. authority (writable, signer)
/// 3. system_program
pub fn build_register_shareholder(
    engine_config: Pubkey,
    shareholder: Pubkey,
    authority: Pubkey,
    owner: Pubkey,
    tier: u8,
    investment_amount: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 32 + 1 + 8);
    data.extend_from_slice(&DISCRIMINATOR_REGISTER_SHAREHOLDER);
    data.extend_from_slice(&owner.to_bytes());
    data.push(tier);
    data.extend_from_slice(&investment_amount.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(engine_config, false),
            AccountMeta::new(shareholder, false),
            AccountMeta::new(authority, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    }
}

fn shareholder_accounts(engine_config: Pubkey, shareholder: Pubkey, authority: Pubkey) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new_readonly(engine_config, false),
        AccountMeta::new(shareholder, false),
        AccountMeta::new_readonly(authority, true),
    ]
}

/// Build update_shareholder instruction
///
/// Accounts:
/// 0. engine_config
/// 1. shareholder (writable)
/// 2. authority (signer)
pub fn build_update_shareholder(
    engine_config: Pubkey,
    shareholder: Pubkey,
    authority: Pubkey,
    tier: u8,
    investment_amount: u64,
    owned_asset_value: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 1 + 8 + 8);
    data.extend_from_slice(&DISCRIMINATOR_UPDATE_SHAREHOLDER);
    data.push(tier);
    data.extend_from_slice(&investment_amount.to_le_bytes());
    data.extend_from_slice(&owned_asset_value.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: shareholder_accounts(engine_config, shareholder, authority),
        data,
    }
}

/// Build award_shares instruction (same accounts as update_shareholder)
pub fn build_award_shares(
    engine_config: Pubkey,
    shareholder: Pubkey,
    authority: Pubkey,
    base_shares: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 8);
    data.extend_from_slice(&DISCRIMINATOR_AWARD_SHARES);
    data.extend_from_slice(&base_shares.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: shareholder_accounts(engine_config, shareholder, authority),
        data,
    }
}

/// Build record_payout instruction (same accounts as update_shareholder)
///
/// `channel` is the PayoutChannel variant index
pub fn build_record_payout(
    engine_config: Pubkey,
    shareholder: Pubkey,
    authority: Pubkey,
    channel: u8,
    amount: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 1 + 8);
    data.extend_from_slice(&DISCRIMINATOR_RECORD_PAYOUT);
    data.push(channel);
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: shareholder_accounts(engine_config, shareholder, authority),
        data,
    }
}

/// Build record_ledger_entry instruction
///
/// Accounts:
/// 0. engine_config
/// 1. quarter_ledger (writable) - init_if_needed
/// 2. authority (writable, signer)
/// 3. system_program
pub fn build_record_ledger_entry(
    engine_config: Pubkey,
    quarter_ledger: Pubkey,
    authority: Pubkey,
    period_value: &str,
    kind: u8,
    amount: u64,
    entry_timestamp: i64,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 4 + period_value.len() + 1 + 8 + 8);
    data.extend_from_slice(&DISCRIMINATOR_RECORD_LEDGER_ENTRY);
    push_string(&mut data, period_value);
    data.push(kind);
    data.extend_from_slice(&amount.to_le_bytes());
    data.extend_from_slice(&entry_timestamp.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(engine_config, false),
            AccountMeta::new(quarter_ledger, false),
            AccountMeta::new(authority, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    }
}

/// Build validate_quarter instruction (no accounts)
pub fn build_validate_quarter(period_type: &str, period_value: &str) -> Instruction {
    let mut data = Vec::with_capacity(8 + 8 + period_type.len() + period_value.len());
    data.extend_from_slice(&DISCRIMINATOR_VALIDATE_QUARTER);
    push_string(&mut data, period_type);
    push_string(&mut data, period_value);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![],
        data,
    }
}

/// Build calculate_quarterly_profit instruction
///
/// Accounts:
/// 0. engine_config
/// 1. quarter_ledger (PDA; may be uninitialized)
pub fn build_calculate_quarterly_profit(
    engine_config: Pubkey,
    quarter_ledger: Pubkey,
    period_type: &str,
    period_value: &str,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 8 + period_type.len() + period_value.len());
    data.extend_from_slice(&DISCRIMINATOR_CALCULATE_QUARTERLY_PROFIT);
    push_string(&mut data, period_type);
    push_string(&mut data, period_value);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(engine_config, false),
            AccountMeta::new_readonly(quarter_ledger, false),
        ],
        data,
    }
}

/// Build process_quarterly_distribution instruction
///
/// Accounts:
/// 0. engine_config (writable)
/// 1. profit_period (writable) - init_if_needed
/// 2. quarter_ledger (PDA; may be uninitialized)
/// 3. authority (writable, signer)
/// 4. system_program
/// remaining_accounts: every registered shareholder (writable)
pub fn build_process_quarterly_distribution(
    engine_config: Pubkey,
    profit_period: Pubkey,
    quarter_ledger: Pubkey,
    authority: Pubkey,
    shareholders: &[Pubkey],
    period_value: &str,
    force: bool,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 8 + 7 + period_value.len() + 1);
    data.extend_from_slice(&DISCRIMINATOR_PROCESS_QUARTERLY_DISTRIBUTION);
    push_string(&mut data, "quarter");
    push_string(&mut data, period_value);
    data.push(force as u8);

    let mut accounts = vec![
        AccountMeta::new(engine_config, false),
        AccountMeta::new(profit_period, false),
        AccountMeta::new_readonly(quarter_ledger, false),
        AccountMeta::new(authority, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    for shareholder in shareholders {
        accounts.push(AccountMeta::new(*shareholder, false));
    }

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data,
    }
}

/// Build mark_distribution_paid instruction
///
/// Accounts:
/// 0. engine_config
/// 1. profit_period (writable)
/// 2. shareholder (writable)
/// 3. shareholder_token_account (writable)
/// 4. vault (writable)
/// 5. mint
/// 6. authority (signer)
/// 7. token_program
#[allow(clippy::too_many_arguments)]
pub fn build_mark_distribution_paid(
    engine_config: Pubkey,
    profit_period: Pubkey,
    shareholder: Pubkey,
    shareholder_token_account: Pubkey,
    vault: Pubkey,
    mint: Pubkey,
    authority: Pubkey,
    index: u8,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 1);
    data.extend_from_slice(&DISCRIMINATOR_MARK_DISTRIBUTION_PAID);
    data.push(index);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(engine_config, false),
            AccountMeta::new(profit_period, false),
            AccountMeta::new(shareholder, false),
            AccountMeta::new(shareholder_token_account, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new_readonly(authority, true),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
        data,
    }
}

/// Build cancel_distribution instruction
///
/// Accounts:
/// 0. engine_config
/// 1. profit_period (writable)
/// 2. shareholder (writable)
/// 3. authority (signer)
pub fn build_cancel_distribution(
    engine_config: Pubkey,
    profit_period: Pubkey,
    shareholder: Pubkey,
    authority: Pubkey,
    index: u8,
) -> Instruction {
    let mut data = Vec::with_capacity(8 + 1);
    data.extend_from_slice(&DISCRIMINATOR_CANCEL_DISTRIBUTION);
    data.push(index);

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(engine_config, false),
            AccountMeta::new(profit_period, false),
            AccountMeta::new(shareholder, false),
            AccountMeta::new_readonly(authority, true),
        ],
        data,
    }
}

/// Build process_all_distribution_payments instruction
///
/// Accounts:
/// 0. engine_config
/// 1. profit_period (writable)
/// 2. vault (writable)
/// 3. mint
/// 4. authority (signer)
/// 5. token_program
/// remaining_accounts: (shareholder, token account) per pending distribution
pub fn build_process_all_distribution_payments(
    engine_config: Pubkey,
    profit_period: Pubkey,
    vault: Pubkey,
    mint: Pubkey,
    authority: Pubkey,
    payees: &[(Pubkey, Pubkey)],
) -> Instruction {
    let mut accounts = vec![
        AccountMeta::new_readonly(engine_config, false),
        AccountMeta::new(profit_period, false),
        AccountMeta::new(vault, false),
        AccountMeta::new_readonly(mint, false),
        AccountMeta::new_readonly(authority, true),
        AccountMeta::new_readonly(spl_token::id(), false),
    ];
    for (shareholder, token_account) in payees {
        accounts.push(AccountMeta::new(*shareholder, false));
        accounts.push(AccountMeta::new(*token_account, false));
    }

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data: DISCRIMINATOR_PROCESS_ALL_DISTRIBUTION_PAYMENTS.to_vec(),
    }
}
