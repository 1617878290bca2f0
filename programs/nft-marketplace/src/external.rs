//! Collaborators the marketplace calls out to: the token registry that owns the
//! assets and the lamport rail that carries payments.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use solana_program::program_option::COption;

use crate::constants::MARKETPLACE_SEED;
use crate::error::MarketplaceError;
use crate::state::AssetIdentity;

pub(crate) trait AssetRegistry {
    fn owner_of(&self, asset: &AssetIdentity) -> Result<Pubkey>;

    fn approved_operator(&self, asset: &AssetIdentity) -> Result<Option<Pubkey>>;

    /// Fails if `from` no longer owns the asset or the approval has lapsed
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, asset: &AssetIdentity) -> Result<()>;
}

pub(crate) trait PaymentRail {
    /// Pull `amount` from the payer into marketplace custody
    fn collect(&mut self, payer: &Pubkey, amount: u64) -> Result<()>;

    /// Release `amount` from custody to the recipient
    fn send(&mut self, recipient: &Pubkey, amount: u64) -> Result<()>;
}

/// SPL token (or Token-2022) program seen through one holder account
pub(crate) struct TokenRegistry<'a, 'info> {
    mint: &'a InterfaceAccount<'info, Mint>,
    holder: &'a InterfaceAccount<'info, TokenAccount>,
    token_program: &'a Interface<'info, TokenInterface>,
    settlement: Option<Settlement<'a, 'info>>,
}

/// Accounts needed to move the asset, only present on purchase
struct Settlement<'a, 'info> {
    recipient: &'a InterfaceAccount<'info, TokenAccount>,
    authority: AccountInfo<'info>,
    authority_bump: u8,
}

impl<'a, 'info> TokenRegistry<'a, 'info> {
    pub fn new(
        mint: &'a InterfaceAccount<'info, Mint>,
        holder: &'a InterfaceAccount<'info, TokenAccount>,
        token_program: &'a Interface<'info, TokenInterface>,
    ) -> Self {
        Self {
            mint,
            holder,
            token_program,
            settlement: None,
        }
    }

    /// Enable `transfer`: the marketplace PDA signs as the holder's delegate
    pub fn settling_into(
        mut self,
        recipient: &'a InterfaceAccount<'info, TokenAccount>,
        authority: AccountInfo<'info>,
        authority_bump: u8,
    ) -> Self {
        self.settlement = Some(Settlement {
            recipient,
            authority,
            authority_bump,
        });
        self
    }

    pub fn asset(&self) -> AssetIdentity {
        AssetIdentity::new(self.token_program.key(), self.mint.key())
    }

    fn check(&self, asset: &AssetIdentity) -> Result<()> {
        require!(*asset == self.asset(), MarketplaceError::AssetMismatch);
        require_keys_eq!(
            *self.mint.to_account_info().owner,
            self.token_program.key(),
            MarketplaceError::AssetMismatch
        );
        // Standard NFT: decimals = 0, supply = 1
        require!(self.mint.decimals == 0, MarketplaceError::UnsupportedMint);
        require!(self.mint.supply == 1, MarketplaceError::UnsupportedMint);
        require!(
            self.holder.mint == self.mint.key() && self.holder.amount == 1,
            MarketplaceError::AssetNotHeld
        );
        Ok(())
    }
}

impl AssetRegistry for TokenRegistry<'_, '_> {
    fn owner_of(&self, asset: &AssetIdentity) -> Result<Pubkey> {
        self.check(asset)?;
        Ok(self.holder.owner)
    }

    fn approved_operator(&self, asset: &AssetIdentity) -> Result<Option<Pubkey>> {
        self.check(asset)?;
        Ok(match self.holder.delegate {
            COption::Some(delegate) if self.holder.delegated_amount >= 1 => Some(delegate),
            _ => None,
        })
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, asset: &AssetIdentity) -> Result<()> {
        self.check(asset)?;
        let settlement = self
            .settlement
            .as_ref()
            .ok_or(MarketplaceError::RecipientMismatch)?;
        require_keys_eq!(self.holder.owner, *from, MarketplaceError::NotOwner);
        require_keys_eq!(settlement.recipient.owner, *to, MarketplaceError::RecipientMismatch);
        require_keys_eq!(
            settlement.recipient.mint,
            self.mint.key(),
            MarketplaceError::RecipientMismatch
        );

        let bump = [settlement.authority_bump];
        let seeds = &[MARKETPLACE_SEED, &bump[..]];
        let signer = &[&seeds[..]];

        let cpi_accounts = TransferChecked {
            from: self.holder.to_account_info(),
            mint: self.mint.to_account_info(),
            to: settlement.recipient.to_account_info(),
            authority: settlement.authority.clone(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer,
        );
        // Rejected by the token program if the delegate was revoked
        token_interface::transfer_checked(cpi_ctx, 1, self.mint.decimals)
    }
}

/// Lamport payments in and out of a proceeds PDA
pub(crate) struct LamportRail<'info> {
    vault: AccountInfo<'info>,
    payer: Option<(AccountInfo<'info>, AccountInfo<'info>)>,
    recipient: Option<AccountInfo<'info>>,
    /// Lamports the vault must keep to stay rent exempt
    reserve: u64,
}

impl<'info> LamportRail<'info> {
    /// Payer funds the vault through the System Program
    pub fn inbound(
        payer: AccountInfo<'info>,
        vault: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
    ) -> Self {
        Self {
            vault,
            payer: Some((payer, system_program)),
            recipient: None,
            reserve: 0,
        }
    }

    /// Vault pays out to the recipient; the program owns the vault, so lamports move directly
    pub fn outbound(vault: AccountInfo<'info>, recipient: AccountInfo<'info>, rent: &Rent) -> Self {
        let reserve = rent.minimum_balance(vault.data_len());
        Self {
            vault,
            payer: None,
            recipient: Some(recipient),
            reserve,
        }
    }
}

impl PaymentRail for LamportRail<'_> {
    fn collect(&mut self, payer: &Pubkey, amount: u64) -> Result<()> {
        let (from, system) = self
            .payer
            .as_ref()
            .ok_or(MarketplaceError::PaymentAccountMismatch)?;
        require_keys_eq!(from.key(), *payer, MarketplaceError::PaymentAccountMismatch);

        let cpi_accounts = system_program::Transfer {
            from: from.clone(),
            to: self.vault.clone(),
        };
        system_program::transfer(CpiContext::new(system.clone(), cpi_accounts), amount)
    }

    fn send(&mut self, recipient: &Pubkey, amount: u64) -> Result<()> {
        let to = self
            .recipient
            .as_ref()
            .ok_or(MarketplaceError::PaymentAccountMismatch)?;
        require_keys_eq!(to.key(), *recipient, MarketplaceError::PaymentAccountMismatch);

        let available = self.vault.lamports().saturating_sub(self.reserve);
        require!(available >= amount, MarketplaceError::InsufficientReserve);

        **self.vault.try_borrow_mut_lamports()? -= amount;
        **to.try_borrow_mut_lamports()? += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProceedsAccount;
    use crate::testing::{account_info, assert_error, program_info};
    use anchor_lang::solana_program::program_pack::Pack;
    use anchor_spl::token::spl_token::{
        self,
        state::{Account as SplAccount, AccountState, Mint as SplMint},
    };

    const RENT: u64 = 2_000_000;

    fn nft_mint() -> SplMint {
        SplMint {
            mint_authority: COption::None,
            supply: 1,
            decimals: 0,
            is_initialized: true,
            freeze_authority: COption::None,
        }
    }

    /// Token account holding one unit; the mint is filled in by `with_registry`
    fn holding(owner: Pubkey) -> SplAccount {
        SplAccount {
            mint: Pubkey::default(),
            owner,
            amount: 1,
            delegate: COption::None,
            state: AccountState::Initialized,
            is_native: COption::None,
            delegated_amount: 0,
            close_authority: COption::None,
        }
    }

    fn packed<T: Pack>(state: &T) -> Vec<u8> {
        let mut data = vec![0; T::LEN];
        state.pack_into_slice(&mut data);
        data
    }

    /// Runs `test` against a registry reading `holder` through the SPL token program
    fn with_registry(
        mint_state: SplMint,
        holder_state: SplAccount,
        test: impl FnOnce(&mut TokenRegistry<'_, '_>),
    ) {
        let token_program = spl_token::ID;
        let mint_key = Pubkey::new_unique();
        let holder_key = Pubkey::new_unique();
        let mut mint_data = packed(&mint_state);
        let mut holder_data = packed(&SplAccount {
            mint: mint_key,
            ..holder_state
        });
        let mut program_data: Vec<u8> = Vec::new();
        let (mut mint_lamports, mut holder_lamports, mut program_lamports) = (RENT, RENT, 1);

        let mint_info = account_info(&mint_key, &token_program, &mut mint_lamports, &mut mint_data);
        let holder_info =
            account_info(&holder_key, &token_program, &mut holder_lamports, &mut holder_data);
        let program = program_info(&token_program, &mut program_lamports, &mut program_data);

        let mint = InterfaceAccount::<Mint>::try_from(&mint_info).unwrap();
        let holder = InterfaceAccount::<TokenAccount>::try_from(&holder_info).unwrap();
        let token_program = Interface::<TokenInterface>::try_from(&program).unwrap();

        let mut registry = TokenRegistry::new(&mint, &holder, &token_program);
        test(&mut registry);
    }

    #[test]
    fn holder_owner_is_the_asset_owner() {
        let owner = Pubkey::new_unique();
        with_registry(nft_mint(), holding(owner), |registry| {
            let asset = registry.asset();
            assert_eq!(asset.registry, spl_token::ID);
            assert_eq!(registry.owner_of(&asset).unwrap(), owner);
            assert_eq!(registry.approved_operator(&asset).unwrap(), None);
        });
    }

    #[test]
    fn delegate_counts_only_while_it_has_allowance() {
        let marketplace = Pubkey::new_unique();
        let spent = SplAccount {
            delegate: COption::Some(marketplace),
            delegated_amount: 0,
            ..holding(Pubkey::new_unique())
        };
        let approved = SplAccount {
            delegated_amount: 1,
            ..spent.clone()
        };

        with_registry(nft_mint(), spent, |registry| {
            let asset = registry.asset();
            assert_eq!(registry.approved_operator(&asset).unwrap(), None);
        });
        with_registry(nft_mint(), approved, |registry| {
            let asset = registry.asset();
            assert_eq!(registry.approved_operator(&asset).unwrap(), Some(marketplace));
        });
    }

    #[test]
    fn fungible_mints_are_not_assets() {
        let fractional = SplMint {
            decimals: 6,
            ..nft_mint()
        };
        with_registry(fractional, holding(Pubkey::new_unique()), |registry| {
            let asset = registry.asset();
            assert_error(registry.owner_of(&asset), MarketplaceError::UnsupportedMint);
        });

        let editions = SplMint {
            supply: 2,
            ..nft_mint()
        };
        with_registry(editions, holding(Pubkey::new_unique()), |registry| {
            let asset = registry.asset();
            assert_error(registry.approved_operator(&asset), MarketplaceError::UnsupportedMint);
        });
    }

    #[test]
    fn empty_token_account_does_not_hold_the_asset() {
        let emptied = SplAccount {
            amount: 0,
            ..holding(Pubkey::new_unique())
        };
        with_registry(nft_mint(), emptied, |registry| {
            let asset = registry.asset();
            assert_error(registry.owner_of(&asset), MarketplaceError::AssetNotHeld);
        });
    }

    #[test]
    fn registry_answers_only_for_its_mint() {
        let owner = Pubkey::new_unique();
        with_registry(nft_mint(), holding(owner), |registry| {
            let other = AssetIdentity::new(spl_token::ID, Pubkey::new_unique());
            assert_error(registry.owner_of(&other), MarketplaceError::AssetMismatch);
            assert_error(registry.approved_operator(&other), MarketplaceError::AssetMismatch);
        });
    }

    #[test]
    fn transfer_needs_a_settlement_account() {
        let owner = Pubkey::new_unique();
        with_registry(nft_mint(), holding(owner), |registry| {
            let asset = registry.asset();
            let buyer = Pubkey::new_unique();
            assert_error(
                registry.transfer(&owner, &buyer, &asset),
                MarketplaceError::RecipientMismatch,
            );
        });
    }

    #[test]
    fn payout_leaves_the_rent_reserve() {
        let rent = Rent::default();
        let reserve = rent.minimum_balance(ProceedsAccount::LEN);
        let system = anchor_lang::system_program::ID;
        let (vault_key, seller) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut vault_lamports = reserve + 500;
        let mut vault_data = vec![0u8; ProceedsAccount::LEN];
        let mut seller_lamports = 10;
        let mut seller_data: Vec<u8> = Vec::new();
        let vault = account_info(&vault_key, &crate::ID, &mut vault_lamports, &mut vault_data);
        let wallet = account_info(&seller, &system, &mut seller_lamports, &mut seller_data);

        let mut rail = LamportRail::outbound(vault.clone(), wallet.clone(), &rent);
        rail.send(&seller, 500).unwrap();

        assert_eq!(vault.lamports(), reserve);
        assert_eq!(wallet.lamports(), 510);
    }

    #[test]
    fn payout_cannot_dip_into_the_reserve() {
        let rent = Rent::default();
        let reserve = rent.minimum_balance(ProceedsAccount::LEN);
        let system = anchor_lang::system_program::ID;
        let (vault_key, seller) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut vault_lamports = reserve + 500;
        let mut vault_data = vec![0u8; ProceedsAccount::LEN];
        let mut seller_lamports = 0;
        let mut seller_data: Vec<u8> = Vec::new();
        let vault = account_info(&vault_key, &crate::ID, &mut vault_lamports, &mut vault_data);
        let wallet = account_info(&seller, &system, &mut seller_lamports, &mut seller_data);

        let mut rail = LamportRail::outbound(vault.clone(), wallet.clone(), &rent);
        assert_error(rail.send(&seller, 501), MarketplaceError::InsufficientReserve);

        assert_eq!(vault.lamports(), reserve + 500);
        assert_eq!(wallet.lamports(), 0);
    }

    #[test]
    fn rails_only_move_funds_for_their_own_accounts() {
        let rent = Rent::default();
        let system = anchor_lang::system_program::ID;
        let (vault_key, seller) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut vault_lamports = RENT;
        let mut vault_data = vec![0u8; ProceedsAccount::LEN];
        let mut seller_lamports = 0;
        let mut seller_data: Vec<u8> = Vec::new();
        let mut program_lamports = 1;
        let mut program_data: Vec<u8> = Vec::new();
        let vault = account_info(&vault_key, &crate::ID, &mut vault_lamports, &mut vault_data);
        let wallet = account_info(&seller, &system, &mut seller_lamports, &mut seller_data);
        let system_program = program_info(&system, &mut program_lamports, &mut program_data);

        let mut outbound = LamportRail::outbound(vault.clone(), wallet.clone(), &rent);
        let stranger = Pubkey::new_unique();
        assert_error(outbound.send(&stranger, 1), MarketplaceError::PaymentAccountMismatch);
        assert_error(outbound.collect(&seller, 1), MarketplaceError::PaymentAccountMismatch);

        let mut inbound = LamportRail::inbound(wallet.clone(), vault.clone(), system_program);
        assert_error(inbound.collect(&stranger, 1), MarketplaceError::PaymentAccountMismatch);
        assert_error(inbound.send(&seller, 1), MarketplaceError::PaymentAccountMismatch);

        assert_eq!(vault.lamports(), RENT);
        assert_eq!(wallet.lamports(), 0);
    }
}
