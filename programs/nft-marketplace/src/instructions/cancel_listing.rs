use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::LISTING_SEED;
use crate::engine;
use crate::events::ItemCancelled;
use crate::external::TokenRegistry;
use crate::registry::ListingSlot;
use crate::state::ListingAccount;

/// Cancel a listing - only the current owner of the NFT may do this
#[derive(Accounts)]
pub struct CancelListing<'info> {
    /// Listing to remove; a missing listing reads as not listed
    #[account(
        init_if_needed,
        payer = owner,
        space = ListingAccount::LEN,
        seeds = [LISTING_SEED, token_program.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub listing: Account<'info, ListingAccount>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// Token account currently holding the NFT
    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Seller recorded on the listing, gets the listing rent back
    /// CHECK: compared against listing.seller before the refund
    #[account(mut)]
    pub seller: UncheckedAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(mut ctx: Context<CancelListing>) -> Result<()> {
    let accounts = &mut ctx.accounts;
    let token_registry = TokenRegistry::new(
        &accounts.mint,
        &accounts.owner_token_account,
        &accounts.token_program,
    );
    let asset = token_registry.asset();
    let mut listings = ListingSlot::new(&mut accounts.listing, asset, ctx.bumps.listing)
        .refunding_to(accounts.seller.to_account_info());

    let removed = engine::cancel_listing(
        &mut listings,
        &token_registry,
        &accounts.owner.key(),
        &asset,
    )?;

    emit!(ItemCancelled::new(accounts.owner.key(), &asset));

    msg!(
        "Listing cancelled: owner={}, mint={}, listed_by={}",
        accounts.owner.key(),
        asset.token_id,
        removed.seller
    );

    Ok(())
}
