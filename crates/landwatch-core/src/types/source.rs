//! The three origins of alert-worthy records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One of the three origin systems an alert can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Automated satellite change-detection reports.
    Satellite,
    /// User-submitted field (community) reports.
    FieldReport,
    /// License-registry state transitions.
    LicenseRegistry,
}

impl SourceKind {
    /// All sources, in normalization order.
    pub const ALL: [SourceKind; 3] = [Self::Satellite, Self::FieldReport, Self::LicenseRegistry];

    /// Return the source as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Satellite => "satellite",
            Self::FieldReport => "field_report",
            Self::LicenseRegistry => "license_registry",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "satellite" => Ok(Self::Satellite),
            "field_report" | "community" => Ok(Self::FieldReport),
            "license_registry" | "license" => Ok(Self::LicenseRegistry),
            _ => Err(AppError::validation(format!(
                "Invalid source: '{s}'. Expected one of: satellite, field_report, license_registry"
            ))),
        }
    }
}
