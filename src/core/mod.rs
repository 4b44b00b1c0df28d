pub mod app;
pub mod auth;
pub mod collections;
pub mod dday;
pub mod likes;
pub mod profile;
pub mod recommend;
pub mod selection;

pub use crate::domain::model::{Florist, Identified, RecommendRequest, Review, Session};
pub use crate::domain::ports::{ConfigProvider, IdentityProvider, RecommendationSource, Storage};
pub use crate::utils::error::Result;
