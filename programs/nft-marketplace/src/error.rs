use anchor_lang::prelude::*;

#[error_code]
pub enum MarketplaceError {
    #[msg("Price must be above zero")]
    InvalidPrice,

    #[msg("Caller does not own the asset")]
    NotOwner,

    #[msg("Marketplace is not the approved operator for this asset")]
    NotApprovedForMarketplace,

    #[msg("Asset is already listed")]
    AlreadyListed,

    #[msg("Asset is not listed")]
    NotListed,

    #[msg("Payment does not meet the listing price")]
    PriceNotMet,

    #[msg("No proceeds to withdraw")]
    NoProceeds,

    #[msg("Mint or token program does not match the requested asset")]
    AssetMismatch,

    #[msg("Unsupported mint type (must be an SPL token NFT)")]
    UnsupportedMint,

    #[msg("Token account does not hold the asset")]
    AssetNotHeld,

    #[msg("Recipient token account does not belong to the buyer")]
    RecipientMismatch,

    #[msg("Seller account does not match the listing")]
    SellerMismatch,

    #[msg("Listing account does not match the asset")]
    ListingAccountMismatch,

    #[msg("Proceeds account does not belong to this payee")]
    ProceedsAccountMismatch,

    #[msg("Payment account does not match the caller")]
    PaymentAccountMismatch,

    #[msg("Proceeds account cannot cover the withdrawal")]
    InsufficientReserve,
}
