//! License-registry row and lifecycle status.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use landwatch_core::traits::SourceRecord;
use landwatch_core::types::SourceKind;

/// A mining license as held by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LicenseRecord {
    /// Unique license identifier.
    pub id: Uuid,
    /// Applicant or holder company.
    pub company_name: Option<String>,
    /// Registry license number.
    pub license_number: Option<String>,
    /// Raw lifecycle status as stored by the registry.
    pub status: Option<String>,
    /// Concession location.
    pub location: Option<String>,
    /// Administrative district.
    pub district: Option<String>,
    /// When the license record was created.
    pub created_at: DateTime<Utc>,
    /// When the license last changed state.
    pub updated_at: Option<DateTime<Utc>>,
}

impl LicenseRecord {
    /// Parsed lifecycle status.
    pub fn lifecycle(&self) -> LicenseStatus {
        LicenseStatus::parse(self.status.as_deref().unwrap_or_default())
    }

    /// The most recent state change, falling back to creation time.
    pub fn last_transition_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

impl SourceRecord for LicenseRecord {
    const SOURCE: SourceKind = SourceKind::LicenseRegistry;

    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Lifecycle state of a license in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseStatus {
    /// Application submitted, awaiting review.
    Pending,
    /// License granted and in force.
    Active,
    /// License ran past its term.
    Expired,
    /// License withdrawn by the regulator.
    Revoked,
    /// Any status the registry emits that is not recognised above.
    Other(String),
}

impl LicenseStatus {
    /// Parse a raw status string. Unknown values are kept verbatim.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "active" => Self::Active,
            "expired" => Self::Expired,
            "revoked" => Self::Revoked,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    /// Return the status as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
