//! Listing registry: asset identity -> active listing.
//!
//! On chain every asset has its own listing PDA, so a store only ever answers
//! for the one asset its account was derived from.

use anchor_lang::prelude::*;

use crate::error::MarketplaceError;
use crate::state::{AssetIdentity, Listing, ListingAccount};

pub(crate) trait ListingRegistry {
    fn get(&self, asset: &AssetIdentity) -> Result<Option<Listing>>;

    fn put(&mut self, asset: &AssetIdentity, listing: Listing) -> Result<()>;

    fn remove(&mut self, asset: &AssetIdentity) -> Result<()>;
}

/// Listing registry backed by a single listing PDA
pub(crate) struct ListingSlot<'a, 'info> {
    account: &'a mut Account<'info, ListingAccount>,
    asset: AssetIdentity,
    bump: u8,
    rent_receiver: Option<AccountInfo<'info>>,
}

impl<'a, 'info> ListingSlot<'a, 'info> {
    pub fn new(
        account: &'a mut Account<'info, ListingAccount>,
        asset: AssetIdentity,
        bump: u8,
    ) -> Self {
        Self {
            account,
            asset,
            bump,
            rent_receiver: None,
        }
    }

    /// Account that gets the rent back when the listing is removed.
    /// Must be the seller recorded on the listing.
    pub fn refunding_to(mut self, receiver: AccountInfo<'info>) -> Self {
        self.rent_receiver = Some(receiver);
        self
    }

    fn check(&self, asset: &AssetIdentity) -> Result<()> {
        require!(*asset == self.asset, MarketplaceError::ListingAccountMismatch);
        Ok(())
    }
}

impl ListingRegistry for ListingSlot<'_, '_> {
    fn get(&self, asset: &AssetIdentity) -> Result<Option<Listing>> {
        self.check(asset)?;
        Ok(self.account.listing())
    }

    fn put(&mut self, asset: &AssetIdentity, listing: Listing) -> Result<()> {
        self.check(asset)?;
        self.account.registry = asset.registry;
        self.account.token_id = asset.token_id;
        self.account.seller = listing.seller;
        self.account.price = listing.price;
        self.account.bump = self.bump;
        Ok(())
    }

    fn remove(&mut self, asset: &AssetIdentity) -> Result<()> {
        self.check(asset)?;
        let receiver = self
            .rent_receiver
            .clone()
            .ok_or(MarketplaceError::SellerMismatch)?;
        require_keys_eq!(
            receiver.key(),
            self.account.seller,
            MarketplaceError::SellerMismatch
        );

        self.account.price = 0;
        self.account.close(receiver)
    }
}

/// Read a listing PDA that may never have been created
pub(crate) fn read_listing(info: &AccountInfo<'_>) -> Result<Option<Listing>> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    let record = ListingAccount::try_deserialize(&mut &data[..])?;
    Ok(record.listing())
}
