//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod ai_recommendation_repo;
pub mod collection_plan_repo;
pub mod commercial_action_repo;
pub mod plan_drop_repo;
pub mod raw_content_repo;
pub mod report_repo;
pub mod signal_repo;
pub mod sku_repo;
pub mod tech_pack_repo;

pub use ai_recommendation_repo::AiRecommendationRepo;
pub use collection_plan_repo::CollectionPlanRepo;
pub use commercial_action_repo::CommercialActionRepo;
pub use plan_drop_repo::PlanDropRepo;
pub use raw_content_repo::RawContentRepo;
pub use report_repo::ReportRepo;
pub use signal_repo::SignalRepo;
pub use sku_repo::SkuRepo;
pub use tech_pack_repo::TechPackRepo;
