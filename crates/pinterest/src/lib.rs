//! Pinterest integration: OAuth authorization-code flow and the read-only
//! Boards/Pins REST endpoints used by Creative Space.

pub mod client;
pub mod error;
pub mod models;

pub use client::{PinterestClient, PinterestConfig};
pub use error::PinterestError;
