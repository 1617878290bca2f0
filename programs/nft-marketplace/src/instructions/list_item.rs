use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::{LISTING_SEED, MARKETPLACE_SEED};
use crate::engine;
use crate::events::ItemListed;
use crate::external::TokenRegistry;
use crate::registry::ListingSlot;
use crate::state::ListingAccount;

/// List an NFT at a fixed price
/// The NFT stays in the seller's token account; the marketplace PDA must be its delegate
#[derive(Accounts)]
pub struct ListItem<'info> {
    /// Listing PDA - zero price until this instruction succeeds
    #[account(
        init_if_needed,
        payer = seller,
        space = ListingAccount::LEN,
        seeds = [LISTING_SEED, token_program.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub listing: Account<'info, ListingAccount>,

    /// Marketplace operator PDA
    /// CHECK: address checked by seeds, holds no data
    #[account(
        seeds = [MARKETPLACE_SEED],
        bump
    )]
    pub marketplace: UncheckedAccount<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// Token account holding the NFT, delegated to the marketplace PDA
    pub seller_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub seller: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(mut ctx: Context<ListItem>, price: u64) -> Result<()> {
    let accounts = &mut ctx.accounts;
    let token_registry = TokenRegistry::new(
        &accounts.mint,
        &accounts.seller_token_account,
        &accounts.token_program,
    );
    let asset = token_registry.asset();
    let mut listings = ListingSlot::new(&mut accounts.listing, asset, ctx.bumps.listing);

    let listing = engine::list_item(
        &mut listings,
        &token_registry,
        &accounts.marketplace.key(),
        &accounts.seller.key(),
        &asset,
        price,
    )?;

    emit!(ItemListed::new(&asset, &listing));

    msg!(
        "Item listed: seller={}, mint={}, price={}",
        listing.seller,
        asset.token_id,
        listing.price
    );

    Ok(())
}
