//! Domain logic for collection planning.
//!
//! This crate has no I/O. Handlers load rows through `atelier_db`, convert
//! them to the plain structs defined here, and call these functions for
//! validation, pricing maths, LLM response parsing, hashtag extraction and
//! the plan overview aggregation.

pub mod cron;
pub mod error;
pub mod hashtags;
pub mod llm_json;
pub mod overview;
pub mod planning;
pub mod pricing;
pub mod scheduling;
pub mod types;
