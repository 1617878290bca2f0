//! Proceeds ledger: account -> withdrawable balance.

use anchor_lang::prelude::*;

use crate::error::MarketplaceError;
use crate::state::ProceedsAccount;

pub(crate) trait ProceedsLedger {
    /// Zero for accounts that were never credited
    fn balance_of(&self, account: &Pubkey) -> Result<u64>;

    fn credit(&mut self, account: &Pubkey, amount: u64) -> Result<()>;

    /// Returns the whole balance and leaves zero behind
    fn take_all(&mut self, account: &Pubkey) -> Result<u64>;
}

/// Proceeds ledger backed by the payee's proceeds PDA
pub(crate) struct ProceedsSlot<'a, 'info> {
    account: &'a mut Account<'info, ProceedsAccount>,
}

impl<'a, 'info> ProceedsSlot<'a, 'info> {
    /// Stamps owner and bump on a freshly allocated account
    pub fn open(
        account: &'a mut Account<'info, ProceedsAccount>,
        owner: Pubkey,
        bump: u8,
    ) -> Result<Self> {
        if account.owner == Pubkey::default() {
            account.owner = owner;
            account.bump = bump;
        }
        require_keys_eq!(account.owner, owner, MarketplaceError::ProceedsAccountMismatch);
        Ok(Self { account })
    }

    fn check(&self, account: &Pubkey) -> Result<()> {
        require_keys_eq!(*account, self.account.owner, MarketplaceError::ProceedsAccountMismatch);
        Ok(())
    }
}

impl ProceedsLedger for ProceedsSlot<'_, '_> {
    fn balance_of(&self, account: &Pubkey) -> Result<u64> {
        self.check(account)?;
        Ok(self.account.amount)
    }

    fn credit(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        self.check(account)?;
        self.account.amount = self.account.amount.saturating_add(amount);
        Ok(())
    }

    fn take_all(&mut self, account: &Pubkey) -> Result<u64> {
        self.check(account)?;
        Ok(std::mem::take(&mut self.account.amount))
    }
}

/// Read the balance of a proceeds PDA that may never have been created
pub(crate) fn read_proceeds(info: &AccountInfo<'_>) -> Result<u64> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return Ok(0);
    }
    let data = info.try_borrow_data()?;
    let record = ProceedsAccount::try_deserialize(&mut &data[..])?;
    Ok(record.amount)
}
