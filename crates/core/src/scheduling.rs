//! Validation for drops and commercial actions (dated records on a plan).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum number of channels on one drop or action.
pub const MAX_CHANNELS: usize = 10;

/// Maximum length of a channel label.
pub const MAX_CHANNEL_LENGTH: usize = 50;

pub const ACTION_PROMOTION: &str = "promotion";
pub const ACTION_CAMPAIGN: &str = "campaign";
pub const ACTION_EVENT: &str = "event";
pub const ACTION_COLLABORATION: &str = "collaboration";
pub const ACTION_MARKDOWN: &str = "markdown";

/// All valid commercial action types.
pub const VALID_ACTION_TYPES: &[&str] = &[
    ACTION_PROMOTION,
    ACTION_CAMPAIGN,
    ACTION_EVENT,
    ACTION_COLLABORATION,
    ACTION_MARKDOWN,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommercialActionType {
    Promotion,
    Campaign,
    Event,
    Collaboration,
    Markdown,
}

impl CommercialActionType {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            ACTION_PROMOTION => Ok(Self::Promotion),
            ACTION_CAMPAIGN => Ok(Self::Campaign),
            ACTION_EVENT => Ok(Self::Event),
            ACTION_COLLABORATION => Ok(Self::Collaboration),
            ACTION_MARKDOWN => Ok(Self::Markdown),
            _ => Err(CoreError::Validation(format!(
                "Invalid action_type '{s}'. Must be one of: {}",
                VALID_ACTION_TYPES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Promotion => ACTION_PROMOTION,
            Self::Campaign => ACTION_CAMPAIGN,
            Self::Event => ACTION_EVENT,
            Self::Collaboration => ACTION_COLLABORATION,
            Self::Markdown => ACTION_MARKDOWN,
        }
    }
}

/// An end date, when present, must not precede the start date.
pub fn validate_date_range(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), CoreError> {
    if let Some(end) = end {
        if end < start {
            return Err(CoreError::Validation(format!(
                "end date {end} is before start date {start}"
            )));
        }
    }
    Ok(())
}

/// Validate a list of channel labels.
pub fn validate_channels(channels: &[String]) -> Result<(), CoreError> {
    if channels.len() > MAX_CHANNELS {
        return Err(CoreError::Validation(format!(
            "at most {MAX_CHANNELS} channels allowed, got {}",
            channels.len()
        )));
    }
    for channel in channels {
        let trimmed = channel.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation(
                "channel names must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_CHANNEL_LENGTH {
            return Err(CoreError::Validation(format!(
                "channel '{trimmed}' exceeds {MAX_CHANNEL_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_ended_range_is_valid() {
        assert!(validate_date_range(date(2026, 3, 1), None).is_ok());
    }

    #[test]
    fn same_day_range_is_valid() {
        assert!(validate_date_range(date(2026, 3, 1), Some(date(2026, 3, 1))).is_ok());
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(validate_date_range(date(2026, 3, 2), Some(date(2026, 3, 1))).is_err());
    }

    #[test]
    fn channel_rules() {
        assert!(validate_channels(&["online".into(), "stores".into()]).is_ok());
        assert!(validate_channels(&[" ".into()]).is_err());
        assert!(validate_channels(&vec!["x".to_string(); 11]).is_err());
        assert!(validate_channels(&["y".repeat(51)]).is_err());
    }

    #[test]
    fn action_types_parse() {
        assert_eq!(
            CommercialActionType::from_str_value("event").unwrap(),
            CommercialActionType::Event
        );
        assert!(CommercialActionType::from_str_value("flash").is_err());
    }
}
