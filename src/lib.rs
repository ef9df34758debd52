pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::{AppConfig, CliConfig};
pub use core::aggregator::{AggregationSettings, FilterPolicy, MatchAggregator};
pub use server::{router, serve, AppState};
pub use utils::error::{FeedError, Result};
