pub mod database;
pub mod memory;
pub mod push;
pub mod store;

pub use store::TokenStore;
