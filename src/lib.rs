pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::Settings;

pub use adapters::{HttpAuthClient, HttpRecommendationClient, LocalStorage, MemoryStorage};
pub use crate::core::{app::AppState, auth::Authenticator, likes::LikesStore, recommend::Recommender};
pub use utils::error::{GaehwaError, Result};
