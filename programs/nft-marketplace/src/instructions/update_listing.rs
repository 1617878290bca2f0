use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::LISTING_SEED;
use crate::engine;
use crate::events::ItemListed;
use crate::external::TokenRegistry;
use crate::registry::ListingSlot;
use crate::state::ListingAccount;

/// Change the price of an active listing, seller unchanged
#[derive(Accounts)]
pub struct UpdateListing<'info> {
    #[account(
        init_if_needed,
        payer = owner,
        space = ListingAccount::LEN,
        seeds = [LISTING_SEED, token_program.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub listing: Account<'info, ListingAccount>,

    pub mint: InterfaceAccount<'info, Mint>,

    pub owner_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(mut ctx: Context<UpdateListing>, new_price: u64) -> Result<()> {
    let accounts = &mut ctx.accounts;
    let token_registry = TokenRegistry::new(
        &accounts.mint,
        &accounts.owner_token_account,
        &accounts.token_program,
    );
    let asset = token_registry.asset();
    let mut listings = ListingSlot::new(&mut accounts.listing, asset, ctx.bumps.listing);

    let listing = engine::update_listing(
        &mut listings,
        &token_registry,
        &accounts.owner.key(),
        &asset,
        new_price,
    )?;

    // Same event as a fresh listing
    emit!(ItemListed::new(&asset, &listing));

    msg!("Listing updated: mint={}, price={}", asset.token_id, listing.price);

    Ok(())
}
