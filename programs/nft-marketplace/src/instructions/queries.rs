use anchor_lang::prelude::*;
use crate::constants::{LISTING_SEED, PROCEEDS_SEED};
use crate::ledger::read_proceeds;
use crate::registry::read_listing;
use crate::state::{AssetIdentity, Listing};

/// Read-only view of a listing PDA
#[derive(Accounts)]
#[instruction(asset: AssetIdentity)]
pub struct GetListing<'info> {
    /// CHECK: may not exist yet; read through read_listing
    #[account(
        seeds = [LISTING_SEED, asset.registry.as_ref(), asset.token_id.as_ref()],
        bump
    )]
    pub listing: UncheckedAccount<'info>,
}

/// Read-only view of a proceeds PDA
#[derive(Accounts)]
#[instruction(account: Pubkey)]
pub struct GetProceeds<'info> {
    /// CHECK: may not exist yet; read through read_proceeds
    #[account(
        seeds = [PROCEEDS_SEED, account.as_ref()],
        bump
    )]
    pub proceeds: UncheckedAccount<'info>,
}

pub fn get_listing_handler(
    ctx: Context<GetListing>,
    _asset: AssetIdentity,
) -> Result<Option<Listing>> {
    read_listing(&ctx.accounts.listing.to_account_info())
}

pub fn get_proceeds_handler(ctx: Context<GetProceeds>, _account: Pubkey) -> Result<u64> {
    read_proceeds(&ctx.accounts.proceeds.to_account_info())
}
