//! Training session model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{coerce, EntityId, SessionId};

/// A scheduled team activity (practice, scrimmage, game).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    /// Unique identifier
    #[serde(default, deserialize_with = "coerce::lenient_id")]
    pub id: SessionId,

    /// Display name (e.g. "Tuesday Scrimmage")
    #[serde(default)]
    pub session_name: String,

    /// Date the session took place. May be absent in older exports;
    /// aggregation falls back to the first participating record's date.
    #[serde(default, deserialize_with = "coerce::lenient_date")]
    pub session_date: Option<NaiveDate>,
}

impl TrainingSession {
    /// Create a new session with a deterministic ID.
    pub fn new(session_name: String, session_date: Option<NaiveDate>) -> Self {
        let date_key = session_date.map(|d| d.to_string()).unwrap_or_default();
        let id = EntityId::generate(&[&session_name, &date_key]);
        Self {
            id,
            session_name,
            session_date,
        }
    }

    /// Ensure the session has an ID, generating one if the export lacked it.
    pub fn ensure_id(&mut self) {
        if self.id.is_empty() {
            let date_key = self.session_date.map(|d| d.to_string()).unwrap_or_default();
            self.id = EntityId::generate(&[&self.session_name, &date_key]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = TrainingSession::new(
            "Tuesday Scrimmage".to_string(),
            NaiveDate::from_ymd_opt(2026, 3, 3),
        );
        assert!(!session.id.is_empty());
        assert_eq!(session.session_name, "Tuesday Scrimmage");
    }

    #[test]
    fn test_session_id_deterministic() {
        let a = TrainingSession::new("Practice".to_string(), NaiveDate::from_ymd_opt(2026, 3, 3));
        let b = TrainingSession::new("Practice".to_string(), NaiveDate::from_ymd_opt(2026, 3, 3));
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_session_lenient_deserialization() {
        // Numeric id, timestamp date: both tolerated.
        let json = r#"{"id": 7, "session_name": "Open Gym", "session_date": "2026-03-03T19:00:00Z"}"#;
        let session: TrainingSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.id.as_str(), "7");
        assert_eq!(session.session_date, NaiveDate::from_ymd_opt(2026, 3, 3));
    }

    #[test]
    fn test_session_missing_date() {
        let json = r#"{"id": "s-1", "session_name": "Open Gym"}"#;
        let session: TrainingSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.session_date, None);
    }

    #[test]
    fn test_session_ensure_id_fills_empty() {
        let json = r#"{"session_name": "Open Gym", "session_date": "2026-03-03"}"#;
        let mut session: TrainingSession = serde_json::from_str(json).unwrap();
        assert!(session.id.is_empty());
        session.ensure_id();
        assert_eq!(session.id.as_str().len(), 16);
    }

    #[test]
    fn test_session_serialization_roundtrip() {
        let session = TrainingSession::new(
            "Shootaround".to_string(),
            NaiveDate::from_ymd_opt(2026, 4, 1),
        );
        let json = serde_json::to_string(&session).unwrap();
        let back: TrainingSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, session.id);
        assert_eq!(back.session_date, session.session_date);
    }
}
