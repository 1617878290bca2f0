pub mod buy_item;
pub mod cancel_listing;
pub mod list_item;
pub mod queries;
pub mod update_listing;
pub mod withdraw_proceeds;

pub use buy_item::*;
pub use cancel_listing::*;
pub use list_item::*;
pub use queries::*;
pub use update_listing::*;
pub use withdraw_proceeds::*;
