//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization and `validator` for
//! transport-level limits. Domain rules (URL and code validity) are enforced
//! by [`crate::application::services::LinkService`].

pub mod health;
pub mod links;
