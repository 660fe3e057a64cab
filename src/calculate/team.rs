//! Team trend calculation: per-session aggregates and a cross-session summary.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{
    AthleteSessionRecord, SessionStat, TeamTrendReport, TeamTrendSummary, TrainingSession,
};

use super::{consistency_score, mean, round2};

/// Compute per-session team statistics in chronological order, plus a
/// summary over all non-empty sessions.
///
/// Only participating records count. Sessions with no participating athletes
/// are dropped from the output entirely, so they never skew the averages.
/// Records that reference a session not present in `sessions` are ignored.
pub fn team_trends(
    sessions: &[TrainingSession],
    records: &[AthleteSessionRecord],
) -> TeamTrendReport {
    let mut by_session: HashMap<&str, Vec<&AthleteSessionRecord>> = HashMap::new();
    for record in records.iter().filter(|r| r.is_participating()) {
        by_session
            .entry(record.session_id.as_str())
            .or_default()
            .push(record);
    }

    let known: std::collections::HashSet<&str> =
        sessions.iter().map(|s| s.id.as_str()).collect();
    for session_id in by_session.keys() {
        if !known.contains(session_id) {
            debug!(session_id, "record references unknown session, ignoring");
        }
    }

    let mut session_stats = Vec::new();
    for session in sessions {
        let Some(participants) = by_session.get(session.id.as_str()) else {
            warn!(
                session_id = %session.id,
                session_name = %session.session_name,
                "session has no participating athletes, skipping"
            );
            continue;
        };

        let total_points: f64 = participants.iter().map(|r| r.points).sum();
        let count = participants.len() as u32;
        // Older exports sometimes lack a date on the session itself; the
        // records carry one alongside each stat line.
        let session_date = session
            .session_date
            .or_else(|| participants.iter().find_map(|r| r.session_date));

        session_stats.push(SessionStat {
            session_id: session.id.clone(),
            session_name: session.session_name.clone(),
            session_date,
            total_points,
            participating_athletes: count,
            avg_points_per_player: round2(total_points / count as f64),
        });
    }

    // Chronological, undated sessions last.
    session_stats.sort_by_key(|s| (s.session_date.is_none(), s.session_date));

    let summary = build_summary(&session_stats);
    TeamTrendReport {
        session_stats,
        summary,
    }
}

fn build_summary(session_stats: &[SessionStat]) -> Option<TeamTrendSummary> {
    if session_stats.is_empty() {
        return None;
    }

    let averages: Vec<f64> = session_stats
        .iter()
        .map(|s| s.avg_points_per_player)
        .collect();
    let total_athletes: u32 = session_stats
        .iter()
        .map(|s| s.participating_athletes)
        .sum();
    let total_points: f64 = session_stats.iter().map(|s| s.total_points).sum();

    let highest = averages.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lowest = averages.iter().cloned().fold(f64::INFINITY, f64::min);

    Some(TeamTrendSummary {
        total_sessions: session_stats.len() as u32,
        overall_average: round2(mean(&averages)),
        highest_average: highest,
        lowest_average: lowest,
        total_athletes_tracked: total_athletes,
        average_athletes_per_session: round2(total_athletes as f64 / session_stats.len() as f64),
        total_points_scored: round2(total_points),
        consistency_score: consistency_score(&averages),
    })
}
