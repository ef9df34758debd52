// Adapters layer: concrete implementations of the domain ports.

pub mod cache;
pub mod credentials;
pub mod football_data;
pub mod user_store;
