//! Account creation helpers for Mollusk tests
//!
//! NOTE: This is written for mollusk-svm 0.5.1 with solana-sdk 2.2
//! Token accounts MUST have owner explicitly set to spl_token::id()

use {
    mollusk_svm::Mollusk,
    solana_sdk::{
        account::Account, bpf_loader_upgradeable, program_pack::Pack, pubkey::Pubkey, rent::Rent,
        system_program,
    },
    spl_associated_token_account::get_associated_token_address,
    spl_token::state::{Account as TokenAccount, AccountState, Mint},
};

pub const MINT_DECIMALS: u8 = 6;

/// Create a system-owned account with given lamports
pub fn system_account(lamports: u64) -> Account {
    Account {
        lamports,
        data: vec![],
        owner: system_program::id(),
        executable: false,
        rent_epoch: 0,
    }
}

/// Create an uninitialized account (for init / init_if_needed)
pub fn uninitialized_account() -> Account {
    system_account(0)
}

/// Create a program-owned, rent-exempt account with data
pub fn program_account(rent: &Rent, data: Vec<u8>, owner: Pubkey) -> Account {
    Account {
        lamports: rent.minimum_balance(data.len()),
        data,
        owner,
        executable: false,
        rent_epoch: 0,
    }
}

/// Create a mock program_data account for BPF upgradeable loader
pub fn program_data_account(upgrade_authority: Option<Pubkey>) -> Account {
    // UpgradeableLoaderState::ProgramData layout:
    // - 4 bytes: discriminant (3 for ProgramData)
    // - 8 bytes: slot
    // - 1 byte: Option discriminant for upgrade_authority
    // - 32 bytes: upgrade_authority pubkey
    let mut data = vec![0u8; 45];
    data[0] = 3;
    if let Some(authority) = upgrade_authority {
        data[12] = 1;
        data[13..45].copy_from_slice(&authority.to_bytes());
    }

    Account {
        lamports: 1_000_000,
        data,
        owner: bpf_loader_upgradeable::id(),
        executable: false,
        rent_epoch: 0,
    }
}

/// Create a mint account owned by the Token program
pub fn mint_account(supply: u64, rent: &Rent) -> Account {
    let mut data = vec![0u8; Mint::LEN];
    Mint::pack(
        Mint {
            mint_authority: Some(Pubkey::new_unique()).into(),
            supply,
            decimals: MINT_DECIMALS,
            is_initialized: true,
            freeze_authority: None.into(),
        },
        &mut data,
    )
    .unwrap();

    Account {
        lamports: rent.minimum_balance(Mint::LEN),
        data,
        owner: spl_token::id(),
        executable: false,
        rent_epoch: 0,
    }
}

fn token_account_with_state(
    mint: Pubkey,
    token_owner: Pubkey,
    amount: u64,
    state: AccountState,
    rent: &Rent,
) -> Account {
    let mut data = vec![0u8; TokenAccount::LEN];
    TokenAccount::pack(
        TokenAccount {
            mint,
            owner: token_owner,
            amount,
            delegate: None.into(),
            state,
            is_native: None.into(),
            delegated_amount: 0,
            close_authority: None.into(),
        },
        &mut data,
    )
    .unwrap();

    Account {
        lamports: rent.minimum_balance(TokenAccount::LEN),
        data,
        owner: spl_token::id(),
        executable: false,
        rent_epoch: 0,
    }
}

/// Create an initialized token account owned by the Token program
pub fn token_account(mint: Pubkey, token_owner: Pubkey, amount: u64, rent: &Rent) -> Account {
    token_account_with_state(mint, token_owner, amount, AccountState::Initialized, rent)
}

/// Create a frozen token account
pub fn frozen_token_account(mint: Pubkey, token_owner: Pubkey, rent: &Rent) -> Account {
    token_account_with_state(mint, token_owner, 0, AccountState::Frozen, rent)
}

/// Token amount held by a token account
pub fn token_balance(account: &Account) -> u64 {
    TokenAccount::unpack(&account.data).unwrap().amount
}

/// Derive ATA address
pub fn derive_ata(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(wallet, mint)
}

/// Get rent from Mollusk
pub fn get_rent(mollusk: &Mollusk) -> Rent {
    mollusk.sysvars.rent.clone()
}

/// Create a system program account tuple for test setup
pub fn system_program_account() -> (Pubkey, Account) {
    (
        system_program::id(),
        Account {
            lamports: 1,
            data: vec![],
            owner: solana_sdk::native_loader::id(),
            executable: true,
            rent_epoch: 0,
        },
    )
}
