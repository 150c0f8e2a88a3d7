// src/lib.rs
// Public library surface for the CLI, integration tests, and reuse.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod types;

// ---- Re-exports for stable public API ----
pub use crate::auth::{ApiKeyAuthenticator, Authenticator};
pub use crate::client::{DiscoveryClient, ResourceDiscovery};
pub use crate::config::{Credentials, FacilitatorConfig};
pub use crate::error::DiscoveryError;
pub use crate::render::render_listing;
pub use crate::types::{PaymentRequirements, ResourceListing, ResourceRecord};
