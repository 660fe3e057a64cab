//! Player ranking calculation: per-player accumulation and a descending sort
//! by average points.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{
    AthleteSessionRecord, PlayerRankingReport, PlayerRankingSummary, PlayerSessionEntry,
    PlayerStat, TrainingSession,
};

use super::{mean, round2};

/// Rank players by average points over their participating sessions.
///
/// The session list resolves names and dates for records whose embedded
/// session fields are missing. Non-participating records never count, so a
/// player's average reflects only sessions they actually took part in.
pub fn player_rankings(
    sessions: &[TrainingSession],
    records: &[AthleteSessionRecord],
) -> PlayerRankingReport {
    let session_index: HashMap<&str, &TrainingSession> =
        sessions.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut by_athlete: HashMap<&str, Vec<&AthleteSessionRecord>> = HashMap::new();
    for record in records.iter().filter(|r| r.is_participating()) {
        by_athlete
            .entry(record.athlete_id.as_str())
            .or_default()
            .push(record);
    }

    let mut player_stats: Vec<PlayerStat> = by_athlete
        .into_values()
        .map(|player_records| build_player_stat(&player_records, &session_index))
        .collect();

    // Descending by average; names break ties so the order is stable.
    player_stats.sort_by(|a, b| {
        b.average_points
            .partial_cmp(&a.average_points)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });

    let summary = build_summary(&player_stats);
    PlayerRankingReport {
        player_stats,
        summary,
    }
}

fn build_player_stat(
    records: &[&AthleteSessionRecord],
    session_index: &HashMap<&str, &TrainingSession>,
) -> PlayerStat {
    let mut sessions: Vec<PlayerSessionEntry> = records
        .iter()
        .map(|r| {
            let session = session_index.get(r.session_id.as_str());
            let session_name = if r.session_name.is_empty() {
                session.map(|s| s.session_name.clone()).unwrap_or_default()
            } else {
                r.session_name.clone()
            };
            let session_date = r
                .session_date
                .or_else(|| session.and_then(|s| s.session_date));
            PlayerSessionEntry {
                session_id: r.session_id.clone(),
                session_name,
                session_date,
                points: r.points,
            }
        })
        .collect();
    sessions.sort_by_key(|e| (e.session_date.is_none(), e.session_date));

    let total_points: f64 = sessions.iter().map(|e| e.points).sum();
    let count = sessions.len() as u32;

    PlayerStat {
        player_id: records[0].athlete_id.clone(),
        player_name: records[0].athlete_name.clone(),
        total_points,
        sessions_participated: count,
        average_points: round2(total_points / count as f64),
        sessions,
    }
}

fn build_summary(player_stats: &[PlayerStat]) -> Option<PlayerRankingSummary> {
    let top = player_stats.first()?;

    let averages: Vec<f64> = player_stats.iter().map(|p| p.average_points).collect();
    let highest = averages.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lowest = averages.iter().cloned().fold(f64::INFINITY, f64::min);
    let total_points: f64 = player_stats.iter().map(|p| p.total_points).sum();
    let total_sessions: u32 = player_stats.iter().map(|p| p.sessions_participated).sum();

    Some(PlayerRankingSummary {
        total_players: player_stats.len() as u32,
        highest_average: highest,
        lowest_average: lowest,
        overall_average: round2(mean(&averages)),
        top_performer: top.clone(),
        total_points_all_players: round2(total_points),
        average_sessions_per_player: round2(total_sessions as f64 / player_stats.len() as f64),
        performance_spread: round2(highest - lowest),
    })
}
