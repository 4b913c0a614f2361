pub mod basket;
pub mod client;
pub mod error;
pub mod types;

pub use basket::parse_basket;
pub use client::EstoreClient;
pub use error::SessionError;
pub use types::{Address, Basket, BasketMutationResponse, Item, Voucher};
