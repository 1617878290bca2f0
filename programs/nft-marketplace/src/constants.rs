use anchor_lang::prelude::*;

#[constant]
pub const LISTING_SEED: &[u8] = b"listing";

#[constant]
pub const PROCEEDS_SEED: &[u8] = b"proceeds";

/// Seed of the PDA sellers approve as delegate; it signs every settlement transfer
#[constant]
pub const MARKETPLACE_SEED: &[u8] = b"marketplace";

