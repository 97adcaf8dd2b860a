//! Weather-derived safety status.

use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Safety status, ordered from benign to severe.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord,
)]
pub enum SafetyStatus {
    /// Good weather, no significant risks
    #[serde(rename = "All Clear")]
    AllClear,
    /// Heavy rain or strong winds, travel with caution
    Warning,
    /// Severe conditions, ghat road closed
    Danger,
}

impl FromStr for SafetyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "allclear" => Ok(SafetyStatus::AllClear),
            "warning" => Ok(SafetyStatus::Warning),
            "danger" => Ok(SafetyStatus::Danger),
            _ => Err(format!("Invalid safety status: {s}")),
        }
    }
}

impl SafetyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyStatus::AllClear => "All Clear",
            SafetyStatus::Warning => "Warning",
            SafetyStatus::Danger => "Danger",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use yatra_core::models::SafetyStatus;
    ///
    /// assert_eq!(SafetyStatus::AllClear.with_icon(), "✓ All Clear");
    /// assert_eq!(SafetyStatus::Warning.with_icon(), "⚠ Warning");
    /// assert_eq!(SafetyStatus::Danger.with_icon(), "✖ Danger");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            SafetyStatus::AllClear => "✓ All Clear",
            SafetyStatus::Warning => "⚠ Warning",
            SafetyStatus::Danger => "✖ Danger",
        }
    }
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Safety alert for a location.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SafetyAlert {
    /// A concise status of the current conditions.
    pub status: SafetyStatus,
    /// A short, human-readable summary of the conditions and any warnings.
    pub summary: String,
    /// The current temperature in Celsius.
    pub temperature: f64,
    /// A brief description of the current weather, e.g. "Clear" or "Rain".
    pub weather_condition: String,
    /// Whether the ghat road is likely open. Always false for Danger.
    pub is_ghat_open: bool,
}

impl SafetyAlert {
    pub const UNAVAILABLE_SUMMARY: &'static str =
        "Could not retrieve live data. Please proceed with caution.";

    /// Conservative alert shown when live data could not be obtained.
    pub fn unavailable() -> Self {
        Self {
            status: SafetyStatus::Warning,
            summary: Self::UNAVAILABLE_SUMMARY.to_string(),
            temperature: 0.0,
            weather_condition: "Unknown".to_string(),
            is_ghat_open: true,
        }
    }

    /// True when the alert violates "Danger implies ghat closed".
    pub fn contradicts_ghat_rule(&self) -> bool {
        self.status == SafetyStatus::Danger && self.is_ghat_open
    }
}
