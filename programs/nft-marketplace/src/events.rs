use anchor_lang::prelude::*;

use crate::state::{AssetIdentity, Listing};

/// Emitted by both `list_item` and `update_listing`
#[event]
#[derive(Debug, PartialEq)]
pub struct ItemListed {
    pub seller: Pubkey,
    pub registry: Pubkey,
    pub token_id: Pubkey,
    pub price: u64,
}

impl ItemListed {
    pub fn new(asset: &AssetIdentity, listing: &Listing) -> Self {
        Self {
            seller: listing.seller,
            registry: asset.registry,
            token_id: asset.token_id,
            price: listing.price,
        }
    }
}

/// `seller` is whoever cancelled, i.e. the current owner
#[event]
#[derive(Debug, PartialEq)]
pub struct ItemCancelled {
    pub seller: Pubkey,
    pub registry: Pubkey,
    pub token_id: Pubkey,
}

impl ItemCancelled {
    pub fn new(caller: Pubkey, asset: &AssetIdentity) -> Self {
        Self {
            seller: caller,
            registry: asset.registry,
            token_id: asset.token_id,
        }
    }
}

#[event]
#[derive(Debug, PartialEq)]
pub struct ItemBought {
    pub buyer: Pubkey,
    pub seller: Pubkey,
    pub registry: Pubkey,
    pub token_id: Pubkey,
    pub price: u64,
}

impl ItemBought {
    pub fn new(buyer: Pubkey, asset: &AssetIdentity, sold: &Listing) -> Self {
        Self {
            buyer,
            seller: sold.seller,
            registry: asset.registry,
            token_id: asset.token_id,
            price: sold.price,
        }
    }
}

#[event]
#[derive(Debug, PartialEq)]
pub struct ProceedsWithdrawn {
    pub seller: Pubkey,
    pub amount: u64,
}
