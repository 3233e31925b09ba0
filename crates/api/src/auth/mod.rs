//! Authentication primitives.
//!
//! - [`jwt`] -- validation of Supabase-issued HS256 access tokens.

pub mod jwt;
