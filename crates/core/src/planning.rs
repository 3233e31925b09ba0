//! Collection plan status and setup-data model.
//!
//! The setup data is the nested structure produced by the planning wizard
//! (target sales, drop count, price segments, family mix, monthly
//! distribution). It is persisted as JSONB on the plan row; this module
//! owns its shape and validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_ARCHIVED: &str = "archived";

/// All valid plan status strings.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_ACTIVE, STATUS_ARCHIVED];

/// Maximum length of a plan name.
pub const MAX_PLAN_NAME_LENGTH: usize = 200;

/// Upper bound on planned drops (one per week).
pub const MAX_DROP_COUNT: i32 = 52;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle flag of a collection plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Draft,
    Active,
    Archived,
}

impl PlanStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_ACTIVE => Ok(Self::Active),
            STATUS_ARCHIVED => Ok(Self::Archived),
            _ => Err(CoreError::Validation(format!(
                "Invalid plan status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Active => STATUS_ACTIVE,
            Self::Archived => STATUS_ARCHIVED,
        }
    }
}

// ---------------------------------------------------------------------------
// Setup data
// ---------------------------------------------------------------------------

/// A price band with its target share of the assortment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSegment {
    pub name: String,
    #[serde(default)]
    pub min_price: f64,
    /// Open-ended when absent.
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub percentage: f64,
}

/// Target share of a product family (e.g. "dresses": 25%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyShare {
    pub family: String,
    #[serde(default)]
    pub percentage: f64,
}

/// Target share of launches in a calendar month (1 = January).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthShare {
    pub month: u32,
    #[serde(default)]
    pub percentage: f64,
}

/// Planning-wizard output stored in `collection_plans.setup_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetupData {
    #[serde(default)]
    pub target_sales: f64,
    /// Planned number of drops; `0` when the wizard has not set one.
    #[serde(default)]
    pub drop_count: i32,
    #[serde(default)]
    pub price_segments: Vec<PriceSegment>,
    #[serde(default)]
    pub product_families: Vec<FamilyShare>,
    #[serde(default)]
    pub monthly_distribution: Vec<MonthShare>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl SetupData {
    /// Lenient parse of a stored JSONB value.
    ///
    /// Rows written before a field existed, or hand-edited rows, fall back
    /// to the default setup rather than failing the whole request.
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Parse a request body value strictly, mapping shape errors to a
    /// validation error.
    pub fn parse(value: serde_json::Value) -> Result<Self, CoreError> {
        serde_json::from_value(value)
            .map_err(|e| CoreError::Validation(format!("Invalid setup_data: {e}")))
    }

    /// Sum of family target percentages.
    pub fn family_total(&self) -> f64 {
        self.product_families.iter().map(|f| f.percentage).sum()
    }

    /// Sum of monthly target percentages.
    pub fn monthly_total(&self) -> f64 {
        self.monthly_distribution.iter().map(|m| m.percentage).sum()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a plan name: non-empty after trimming and bounded length.
pub fn validate_plan_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("name is required".to_string()));
    }
    if trimmed.chars().count() > MAX_PLAN_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "name must be at most {MAX_PLAN_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the setup data submitted by the planning wizard or a save.
///
/// Percentage sums are not enforced here; the overview reports them as
/// warnings so partially-filled plans can still be saved.
pub fn validate_setup_data(setup: &SetupData) -> Result<(), CoreError> {
    if !setup.target_sales.is_finite() || setup.target_sales < 0.0 {
        return Err(CoreError::Validation(
            "target_sales must be a non-negative number".to_string(),
        ));
    }
    if !(0..=MAX_DROP_COUNT).contains(&setup.drop_count) {
        return Err(CoreError::Validation(format!(
            "drop_count must be between 0 and {MAX_DROP_COUNT}, got {}",
            setup.drop_count
        )));
    }

    let mut segment_names = HashSet::new();
    for segment in &setup.price_segments {
        validate_label("price segment name", &segment.name, &mut segment_names)?;
        validate_percentage(&segment.name, segment.percentage)?;
        if !segment.min_price.is_finite() || segment.min_price < 0.0 {
            return Err(CoreError::Validation(format!(
                "price segment '{}' min_price must be a non-negative number",
                segment.name
            )));
        }
        if let Some(max) = segment.max_price {
            if !max.is_finite() || max < segment.min_price {
                return Err(CoreError::Validation(format!(
                    "price segment '{}' max_price must be >= min_price",
                    segment.name
                )));
            }
        }
    }

    let mut families = HashSet::new();
    for share in &setup.product_families {
        validate_label("product family", &share.family, &mut families)?;
        validate_percentage(&share.family, share.percentage)?;
    }

    let mut months = HashSet::new();
    for share in &setup.monthly_distribution {
        if !(1..=12).contains(&share.month) {
            return Err(CoreError::Validation(format!(
                "month must be between 1 and 12, got {}",
                share.month
            )));
        }
        if !months.insert(share.month) {
            return Err(CoreError::Validation(format!(
                "month {} appears more than once",
                share.month
            )));
        }
        validate_percentage(&format!("month {}", share.month), share.percentage)?;
    }

    Ok(())
}

fn validate_label(kind: &str, label: &str, seen: &mut HashSet<String>) -> Result<(), CoreError> {
    let key = label.trim().to_lowercase();
    if key.is_empty() {
        return Err(CoreError::Validation(format!("{kind} must not be empty")));
    }
    if !seen.insert(key) {
        return Err(CoreError::Validation(format!(
            "{kind} '{label}' appears more than once"
        )));
    }
    Ok(())
}

fn validate_percentage(label: &str, pct: f64) -> Result<(), CoreError> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(CoreError::Validation(format!(
            "percentage for '{label}' must be between 0 and 100, got {pct}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
