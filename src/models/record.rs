//! Per-athlete session record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{coerce, AthleteId, EntityId, SessionId};

/// Attendance statuses that count as having taken part in a session.
/// Everything else (absent, injured, excused, free text) is excluded from
/// every aggregate.
pub const PARTICIPATING_STATUSES: [&str; 4] = ["present", "late", "left early", "late arrival"];

/// Check an attendance status against the participating set, case-insensitively.
pub fn is_participating(status: &str) -> bool {
    let status = status.trim().to_lowercase();
    PARTICIPATING_STATUSES.contains(&status.as_str())
}

/// One athlete's stat line for one session.
///
/// Numeric fields are coerced defensively: non-numeric or missing values
/// become 0 rather than failing the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteSessionRecord {
    /// Session this record belongs to
    #[serde(default, deserialize_with = "coerce::lenient_id")]
    pub session_id: SessionId,

    /// Athlete identifier
    #[serde(default, deserialize_with = "coerce::lenient_id")]
    pub athlete_id: AthleteId,

    /// Athlete display name
    #[serde(default)]
    pub athlete_name: String,

    /// Session name as embedded in the record (may be empty; the session
    /// list is the authoritative source)
    #[serde(default)]
    pub session_name: String,

    /// Session date as recorded alongside the stat line
    #[serde(default, deserialize_with = "coerce::lenient_date")]
    pub session_date: Option<NaiveDate>,

    /// Free-text attendance status
    #[serde(default)]
    pub attendance: String,

    #[serde(default, deserialize_with = "coerce::f64_or_zero")]
    pub points: f64,

    #[serde(default, deserialize_with = "coerce::f64_or_zero")]
    pub rebounds: f64,

    #[serde(default, deserialize_with = "coerce::f64_or_zero")]
    pub assists: f64,

    #[serde(default, deserialize_with = "coerce::f64_or_zero")]
    pub turnovers: f64,

    #[serde(default, deserialize_with = "coerce::f64_or_zero")]
    pub fouls: f64,

    /// Rate of perceived exertion (effort rating, typically 1-10)
    #[serde(default, deserialize_with = "coerce::f64_or_zero")]
    pub rpe: f64,
}

impl AthleteSessionRecord {
    /// Whether this record counts toward aggregates.
    pub fn is_participating(&self) -> bool {
        is_participating(&self.attendance)
    }

    /// Deterministic ID for dedup on import, derived from the identifying
    /// fields (one record per athlete per session).
    pub fn dedup_key(&self) -> EntityId {
        EntityId::generate(&[self.session_id.as_str(), self.athlete_id.as_str()])
    }
}
