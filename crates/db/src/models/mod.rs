//! Row models and DTOs, one module per table.

pub mod ai_recommendation;
pub mod collection_plan;
pub mod commercial_action;
pub mod plan_drop;
pub mod raw_content;
pub mod report;
pub mod signal;
pub mod sku;
pub mod tech_pack;
