use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use crate::constants::{LISTING_SEED, MARKETPLACE_SEED, PROCEEDS_SEED};
use crate::engine;
use crate::events::ItemBought;
use crate::external::{LamportRail, TokenRegistry};
use crate::ledger::ProceedsSlot;
use crate::registry::ListingSlot;
use crate::state::{ListingAccount, ProceedsAccount};

/// Buy a listed NFT
/// Payment is credited to the seller's proceeds PDA, the NFT moves through the
/// marketplace delegate
#[derive(Accounts)]
pub struct BuyItem<'info> {
    #[account(
        init_if_needed,
        payer = buyer,
        space = ListingAccount::LEN,
        seeds = [LISTING_SEED, token_program.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub listing: Account<'info, ListingAccount>,

    /// Seller's proceeds PDA, receives the payment
    #[account(
        init_if_needed,
        payer = buyer,
        space = ProceedsAccount::LEN,
        seeds = [PROCEEDS_SEED, seller.key().as_ref()],
        bump
    )]
    pub proceeds: Account<'info, ProceedsAccount>,

    /// Marketplace operator PDA, signs the NFT transfer as delegate
    /// CHECK: address checked by seeds, holds no data
    #[account(
        seeds = [MARKETPLACE_SEED],
        bump
    )]
    pub marketplace: UncheckedAccount<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// Token account holding the NFT
    #[account(mut)]
    pub seller_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Buyer's ATA to receive the NFT
    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = mint,
        associated_token::authority = buyer,
        associated_token::token_program = token_program
    )]
    pub buyer_token_account: InterfaceAccount<'info, TokenAccount>,

    /// Seller recorded on the listing
    /// CHECK: compared against listing.seller before rent refund and credit
    #[account(mut)]
    pub seller: UncheckedAccount<'info>,

    #[account(mut)]
    pub buyer: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(mut ctx: Context<BuyItem>, payment: u64) -> Result<()> {
    let accounts = &mut ctx.accounts;
    let buyer = accounts.buyer.key();

    let mut token_registry = TokenRegistry::new(
        &accounts.mint,
        &accounts.seller_token_account,
        &accounts.token_program,
    )
    .settling_into(
        &accounts.buyer_token_account,
        accounts.marketplace.to_account_info(),
        ctx.bumps.marketplace,
    );
    let asset = token_registry.asset();

    let mut payments = LamportRail::inbound(
        accounts.buyer.to_account_info(),
        accounts.proceeds.to_account_info(),
        accounts.system_program.to_account_info(),
    );
    let mut ledger = ProceedsSlot::open(
        &mut accounts.proceeds,
        accounts.seller.key(),
        ctx.bumps.proceeds,
    )?;
    let mut listings = ListingSlot::new(&mut accounts.listing, asset, ctx.bumps.listing)
        .refunding_to(accounts.seller.to_account_info());

    let listing = engine::buy_item(
        &mut listings,
        &mut ledger,
        &mut token_registry,
        &mut payments,
        &buyer,
        &asset,
        payment,
    )?;

    emit!(ItemBought::new(buyer, &asset, &listing));

    msg!(
        "Purchase completed: buyer={}, seller={}, mint={}, price={}",
        buyer,
        listing.seller,
        asset.token_id,
        listing.price
    );

    Ok(())
}
