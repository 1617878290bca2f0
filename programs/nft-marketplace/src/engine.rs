//! Marketplace protocol.
//!
//! Every operation validates first, then mutates the listing registry and the
//! proceeds ledger, and only then calls out to the asset registry or the payment
//! rail. A call that re-enters the marketplace from inside a transfer therefore
//! observes the listing already gone and the balance already zeroed.

use anchor_lang::prelude::*;

use crate::error::MarketplaceError;
use crate::external::{AssetRegistry, PaymentRail};
use crate::ledger::ProceedsLedger;
use crate::registry::ListingRegistry;
use crate::state::{AssetIdentity, Listing};

fn require_owner(
    registry: &impl AssetRegistry,
    caller: &Pubkey,
    asset: &AssetIdentity,
) -> Result<()> {
    let owner = registry.owner_of(asset)?;
    if owner != *caller {
        return Err(error!(MarketplaceError::NotOwner).with_pubkeys((*caller, owner)));
    }
    Ok(())
}

fn require_listed(listings: &impl ListingRegistry, asset: &AssetIdentity) -> Result<Listing> {
    listings.get(asset)?.ok_or_else(|| {
        error!(MarketplaceError::NotListed).with_pubkeys((asset.registry, asset.token_id))
    })
}

pub(crate) fn list_item(
    listings: &mut impl ListingRegistry,
    registry: &impl AssetRegistry,
    marketplace: &Pubkey,
    caller: &Pubkey,
    asset: &AssetIdentity,
    price: u64,
) -> Result<Listing> {
    require!(price > 0, MarketplaceError::InvalidPrice);
    require_owner(registry, caller, asset)?;

    let operator = registry.approved_operator(asset)?;
    if operator != Some(*marketplace) {
        return Err(error!(MarketplaceError::NotApprovedForMarketplace)
            .with_pubkeys((*marketplace, operator.unwrap_or_default())));
    }
    if listings.get(asset)?.is_some() {
        return Err(error!(MarketplaceError::AlreadyListed)
            .with_pubkeys((asset.registry, asset.token_id)));
    }

    let listing = Listing {
        seller: *caller,
        price,
    };
    listings.put(asset, listing)?;
    Ok(listing)
}

/// Ownership is checked against the registry now, not against the recorded
/// seller, so a stale listing can only be cleared by the current owner.
pub(crate) fn cancel_listing(
    listings: &mut impl ListingRegistry,
    registry: &impl AssetRegistry,
    caller: &Pubkey,
    asset: &AssetIdentity,
) -> Result<Listing> {
    let listing = require_listed(listings, asset)?;
    require_owner(registry, caller, asset)?;

    listings.remove(asset)?;
    Ok(listing)
}

pub(crate) fn update_listing(
    listings: &mut impl ListingRegistry,
    registry: &impl AssetRegistry,
    caller: &Pubkey,
    asset: &AssetIdentity,
    new_price: u64,
) -> Result<Listing> {
    let listing = require_listed(listings, asset)?;
    require_owner(registry, caller, asset)?;
    // A zero price would leave a listing that reads as absent
    require!(new_price > 0, MarketplaceError::InvalidPrice);

    let updated = Listing {
        seller: listing.seller,
        price: new_price,
    };
    listings.put(asset, updated)?;
    Ok(updated)
}

/// Only `price` is charged; `payment` is the most the buyer agreed to pay.
pub(crate) fn buy_item(
    listings: &mut impl ListingRegistry,
    ledger: &mut impl ProceedsLedger,
    registry: &mut impl AssetRegistry,
    payments: &mut impl PaymentRail,
    caller: &Pubkey,
    asset: &AssetIdentity,
    payment: u64,
) -> Result<Listing> {
    let listing = require_listed(listings, asset)?;
    if payment < listing.price {
        return Err(error!(MarketplaceError::PriceNotMet).with_values((payment, listing.price)));
    }

    listings.remove(asset)?;
    payments.collect(caller, listing.price)?;
    ledger.credit(&listing.seller, listing.price)?;
    registry.transfer(&listing.seller, caller, asset)?;
    Ok(listing)
}

pub(crate) fn withdraw_proceeds(
    ledger: &mut impl ProceedsLedger,
    payments: &mut impl PaymentRail,
    caller: &Pubkey,
) -> Result<u64> {
    require!(ledger.balance_of(caller)? > 0, MarketplaceError::NoProceeds);

    let amount = ledger.take_all(caller)?;
    payments.send(caller, amount)?;
    Ok(amount)
}
