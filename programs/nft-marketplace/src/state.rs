use anchor_lang::prelude::*;

/// Identifies one asset across any number of token registries.
/// `registry` is the token program owning the mint, `token_id` is the mint.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct AssetIdentity {
    pub registry: Pubkey,
    pub token_id: Pubkey,
}

impl AssetIdentity {
    pub const LEN: usize = 32 + 32;

    pub fn new(registry: Pubkey, token_id: Pubkey) -> Self {
        Self { registry, token_id }
    }
}

/// An active offer to sell one asset at a fixed price
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Listing {
    pub seller: Pubkey,
    pub price: u64,
}

/// Listing PDA
/// Seeds: [b"listing", registry, token_id]
/// A zero price means the asset is not listed
#[account]
#[derive(Default)]
pub struct ListingAccount {
    pub registry: Pubkey,        // Token program owning the mint
    pub token_id: Pubkey,        // NFT mint
    pub seller: Pubkey,          // Pays the rent, receives it back on removal
    pub price: u64,              // Lamports
    pub bump: u8,
}

impl ListingAccount {
    pub const LEN: usize = 8 +   // discriminator
        AssetIdentity::LEN +      // registry + token_id
        32 +                      // seller
        8 +                       // price
        1;                        // bump

    pub fn listing(&self) -> Option<Listing> {
        (self.price > 0).then(|| Listing {
            seller: self.seller,
            price: self.price,
        })
    }
}

/// Proceeds PDA, one per payee
/// Seeds: [b"proceeds", owner]
/// Holds the withdrawable lamports on top of its rent-exempt reserve
#[account]
#[derive(Default)]
pub struct ProceedsAccount {
    pub owner: Pubkey,
    pub amount: u64,
    pub bump: u8,
}

impl ProceedsAccount {
    pub const LEN: usize = 8 + 32 + 8 + 1;
}
