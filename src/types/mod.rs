//! Core domain types.

mod ids;
mod pr;

pub use ids::{DeliveryId, PrNumber, RepoId, Sha};
pub use pr::PullRequest;
