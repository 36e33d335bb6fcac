//! Alert source enumeration.

use serde::{Deserialize, Serialize};

use landwatch_core::types::SourceKind;

/// Origin of a normalized alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertSource {
    /// Satellite change detection.
    Satellite,
    /// Community field report.
    Report,
    /// License-registry event.
    System,
}

impl AlertSource {
    /// Return the source as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Satellite => "Satellite",
            Self::Report => "Report",
            Self::System => "System",
        }
    }
}

impl From<SourceKind> for AlertSource {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Satellite => Self::Satellite,
            SourceKind::FieldReport => Self::Report,
            SourceKind::LicenseRegistry => Self::System,
        }
    }
}

impl std::fmt::Display for AlertSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
