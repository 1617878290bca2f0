use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

mod engine;
mod external;
mod ledger;
mod registry;
#[cfg(test)]
mod testing;

use instructions::*;
use state::{AssetIdentity, Listing};

declare_id!("6kMZfBAK5aEwBx6oWv28hdt9UFzEcuy4WA6Ljf8g7ELg");

#[program]
pub mod nft_marketplace {
    use super::*;

    /// List an NFT for a fixed price (marketplace PDA must be its delegate)
    pub fn list_item(ctx: Context<ListItem>, price: u64) -> Result<()> {
        list_item::handler(ctx, price)
    }

    /// Remove a listing (current owner only)
    pub fn cancel_listing(ctx: Context<CancelListing>) -> Result<()> {
        cancel_listing::handler(ctx)
    }

    /// Change the price of an active listing
    pub fn update_listing(ctx: Context<UpdateListing>, new_price: u64) -> Result<()> {
        update_listing::handler(ctx, new_price)
    }

    /// Buy a listed NFT; `payment` is the most the buyer will pay
    pub fn buy_item(ctx: Context<BuyItem>, payment: u64) -> Result<()> {
        buy_item::handler(ctx, payment)
    }

    /// Pull accumulated proceeds
    pub fn withdraw_proceeds(ctx: Context<WithdrawProceeds>) -> Result<()> {
        withdraw_proceeds::handler(ctx)
    }

    pub fn get_listing(ctx: Context<GetListing>, asset: AssetIdentity) -> Result<Option<Listing>> {
        queries::get_listing_handler(ctx, asset)
    }

    pub fn get_proceeds(ctx: Context<GetProceeds>, account: Pubkey) -> Result<u64> {
        queries::get_proceeds_handler(ctx, account)
    }
}
