pub mod aggregator;

pub use crate::domain::model::{Competition, Match, MatchRecord};
pub use crate::domain::ports::{ConfigProvider, CredentialSource, FootballDataSource, UserRepository};
pub use crate::utils::error::Result;
