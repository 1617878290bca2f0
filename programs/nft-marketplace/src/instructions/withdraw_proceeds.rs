use anchor_lang::prelude::*;
use crate::constants::PROCEEDS_SEED;
use crate::engine;
use crate::events::ProceedsWithdrawn;
use crate::external::LamportRail;
use crate::ledger::ProceedsSlot;
use crate::state::ProceedsAccount;

/// Pull accumulated sale proceeds out of the payee's proceeds PDA
#[derive(Accounts)]
pub struct WithdrawProceeds<'info> {
    /// A payee that never sold anything reads as zero proceeds
    #[account(
        init_if_needed,
        payer = seller,
        space = ProceedsAccount::LEN,
        seeds = [PROCEEDS_SEED, seller.key().as_ref()],
        bump
    )]
    pub proceeds: Account<'info, ProceedsAccount>,

    #[account(mut)]
    pub seller: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(mut ctx: Context<WithdrawProceeds>) -> Result<()> {
    let accounts = &mut ctx.accounts;
    let seller = accounts.seller.key();

    let mut payments = LamportRail::outbound(
        accounts.proceeds.to_account_info(),
        accounts.seller.to_account_info(),
        &Rent::get()?,
    );
    let mut ledger = ProceedsSlot::open(&mut accounts.proceeds, seller, ctx.bumps.proceeds)?;

    let amount = engine::withdraw_proceeds(&mut ledger, &mut payments, &seller)?;

    emit!(ProceedsWithdrawn { seller, amount });

    msg!("Proceeds withdrawn: seller={}, amount={}", seller, amount);

    Ok(())
}
