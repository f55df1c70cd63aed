//! Core domain entities.
//!
//! - [`Link`] - A short code mapped to a target URL, with its visit counter
//! - [`NewLink`] - Input for creating a link; storage fills in the rest

pub mod link;

pub use link::{Link, NewLink};
