//! Recurrence model
//!
//! Describes how often an income, expense or transfer posts. Every variant is
//! stateless except [`Recurrence::Custom`], which repeats every `interval`
//! months counted from the event's start month.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a money event repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Recurrence {
    /// Posts exactly once, on the start date
    Once,
    Daily,
    Weekly,
    Monthly,
    /// Every three months from the start month
    Quarterly,
    /// Once a year, in the start month
    Yearly,
    /// Every `interval` months from the start month
    Custom { interval: u32 },
}

impl Recurrence {
    /// Create a custom "every N months" recurrence
    ///
    /// # Errors
    ///
    /// Fails when `interval` is zero or negative.
    pub fn custom(interval: i64) -> Result<Self, RecurrenceValidationError> {
        if interval <= 0 || interval > u32::MAX as i64 {
            return Err(RecurrenceValidationError::InvalidInterval(interval));
        }
        Ok(Self::Custom {
            interval: interval as u32,
        })
    }

    /// Whether this recurrence repeats at all
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::Once)
    }

    /// Month period for the modulus-based kinds (quarterly and custom)
    pub fn month_interval(&self) -> Option<u32> {
        match self {
            Self::Quarterly => Some(3),
            Self::Custom { interval } => Some(*interval),
            _ => None,
        }
    }

    /// Check that a deserialized recurrence is well formed
    pub fn validate(&self) -> Result<(), RecurrenceValidationError> {
        match self {
            Self::Custom { interval: 0 } => Err(RecurrenceValidationError::InvalidInterval(0)),
            _ => Ok(()),
        }
    }

    /// Parse a recurrence from a string
    ///
    /// Accepts the kind names plus `custom:N` (e.g. "custom:2").
    pub fn parse(s: &str) -> Result<Self, RecurrenceValidationError> {
        let s = s.trim().to_lowercase();

        if let Some(interval) = s.strip_prefix("custom:") {
            let interval: i64 = interval
                .trim()
                .parse()
                .map_err(|_| RecurrenceValidationError::UnknownKind(s.clone()))?;
            return Self::custom(interval);
        }

        match s.as_str() {
            "once" | "one-off" | "oneoff" => Ok(Self::Once),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annual" | "annually" => Ok(Self::Yearly),
            _ => Err(RecurrenceValidationError::UnknownKind(s)),
        }
    }
}

impl Default for Recurrence {
    fn default() -> Self {
        Self::Monthly
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Once => write!(f, "Once"),
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Quarterly => write!(f, "Quarterly"),
            Self::Yearly => write!(f, "Yearly"),
            Self::Custom { interval: 1 } => write!(f, "Every month"),
            Self::Custom { interval } => write!(f, "Every {} months", interval),
        }
    }
}

/// Validation errors for recurrences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceValidationError {
    InvalidInterval(i64),
    UnknownKind(String),
}

impl fmt::Display for RecurrenceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInterval(n) => {
                write!(f, "Custom interval must be at least 1 month (got {})", n)
            }
            Self::UnknownKind(s) => write!(f, "Unknown recurrence: {}", s),
        }
    }
}

impl std::error::Error for RecurrenceValidationError {}
