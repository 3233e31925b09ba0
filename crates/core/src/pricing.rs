//! SKU pricing maths and field validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::planning::PriceSegment;

pub const CHANNEL_DTC: &str = "dtc";
pub const CHANNEL_WHOLESALE: &str = "wholesale";
pub const CHANNEL_MARKETPLACE: &str = "marketplace";
pub const CHANNEL_OMNICHANNEL: &str = "omnichannel";

/// All valid SKU sales channels.
pub const VALID_CHANNELS: &[&str] = &[
    CHANNEL_DTC,
    CHANNEL_WHOLESALE,
    CHANNEL_MARKETPLACE,
    CHANNEL_OMNICHANNEL,
];

/// Where a SKU is sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesChannel {
    Dtc,
    Wholesale,
    Marketplace,
    Omnichannel,
}

impl SalesChannel {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            CHANNEL_DTC => Ok(Self::Dtc),
            CHANNEL_WHOLESALE => Ok(Self::Wholesale),
            CHANNEL_MARKETPLACE => Ok(Self::Marketplace),
            CHANNEL_OMNICHANNEL => Ok(Self::Omnichannel),
            _ => Err(CoreError::Validation(format!(
                "Invalid channel '{s}'. Must be one of: {}",
                VALID_CHANNELS.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dtc => CHANNEL_DTC,
            Self::Wholesale => CHANNEL_WHOLESALE,
            Self::Marketplace => CHANNEL_MARKETPLACE,
            Self::Omnichannel => CHANNEL_OMNICHANNEL,
        }
    }
}

/// Validate an optional channel string.
pub fn validate_channel(channel: Option<&str>) -> Result<(), CoreError> {
    match channel {
        Some(c) => SalesChannel::from_str_value(c).map(|_| ()),
        None => Ok(()),
    }
}

/// Gross margin as a percentage of the retail price, rounded to 2 decimals.
///
/// Returns `None` when the price is zero or negative.
pub fn margin_percent(pvp: f64, cost: f64) -> Option<f64> {
    if !pvp.is_finite() || !cost.is_finite() || pvp <= 0.0 {
        return None;
    }
    Some(round2((pvp - cost) / pvp * 100.0))
}

/// Validate retail price and unit cost.
pub fn validate_sku_prices(pvp: f64, cost: f64) -> Result<(), CoreError> {
    for (field, value) in [("pvp", pvp), ("cost", cost)] {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::Validation(format!(
                "{field} must be a non-negative number, got {value}"
            )));
        }
    }
    Ok(())
}

/// Validate a planned buy quantity.
pub fn validate_units(units: Option<i32>) -> Result<(), CoreError> {
    if let Some(u) = units {
        if u < 0 {
            return Err(CoreError::Validation(format!(
                "units must be >= 0, got {u}"
            )));
        }
    }
    Ok(())
}

/// The first segment whose band contains `price`.
pub fn segment_for_price(price: f64, segments: &[PriceSegment]) -> Option<&str> {
    segments
        .iter()
        .find(|s| price >= s.min_price && s.max_price.map_or(true, |max| price <= max))
        .map(|s| s.name.as_str())
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
