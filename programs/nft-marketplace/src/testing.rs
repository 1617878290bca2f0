//! Host-side helpers for exercising the account-backed adapters.

use anchor_lang::error::Error;
use anchor_lang::prelude::*;

use crate::error::MarketplaceError;

/// Writable, non-signing account owned by `owner`
pub(crate) fn account_info<'a>(
    key: &'a Pubkey,
    owner: &'a Pubkey,
    lamports: &'a mut u64,
    data: &'a mut [u8],
) -> AccountInfo<'a> {
    AccountInfo::new(key, false, true, lamports, data, owner, false, 0)
}

/// Executable account at `key`, as the runtime passes program ids
pub(crate) fn program_info<'a>(
    key: &'a Pubkey,
    lamports: &'a mut u64,
    data: &'a mut [u8],
) -> AccountInfo<'a> {
    AccountInfo::new(
        key,
        false,
        false,
        lamports,
        data,
        &anchor_lang::solana_program::bpf_loader_upgradeable::ID,
        true,
        0,
    )
}

fn error_code(err: &Error) -> Option<u32> {
    match err {
        Error::AnchorError(e) => Some(e.error_code_number),
        Error::ProgramError(_) => None,
    }
}

#[track_caller]
pub(crate) fn assert_error<T>(result: Result<T>, expected: MarketplaceError) {
    let expected: Error = expected.into();
    match result {
        Ok(_) => panic!("expected {expected}, got success"),
        Err(err) => assert_eq!(error_code(&err), error_code(&expected), "got {err}"),
    }
}
