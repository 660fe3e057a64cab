//! Derived analytics models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AthleteId, SessionId};

/// Per-session team statistics, derived over participating athletes only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStat {
    /// Session ID
    pub session_id: SessionId,

    /// Session name
    pub session_name: String,

    /// Session date (the session's own date, or the first participating
    /// record's date when the session lacks one)
    pub session_date: Option<NaiveDate>,

    /// Sum of points over participating athletes
    pub total_points: f64,

    /// Number of participating athletes
    pub participating_athletes: u32,

    /// total_points / participating_athletes, rounded to 2 decimals
    pub avg_points_per_player: f64,
}

/// Roll-up over all non-empty session stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamTrendSummary {
    pub total_sessions: u32,

    /// Mean of the per-session averages
    pub overall_average: f64,

    pub highest_average: f64,
    pub lowest_average: f64,

    /// Sum of participant counts across sessions
    pub total_athletes_tracked: u32,

    pub average_athletes_per_session: f64,
    pub total_points_scored: f64,

    /// 100 minus the coefficient of variation of the per-session averages,
    /// as a percentage, clamped to [0, 100]
    pub consistency_score: f64,
}

/// Team trend output: chronological session stats plus a summary.
/// `summary` is `None` when no session had a participating athlete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamTrendReport {
    pub session_stats: Vec<SessionStat>,
    pub summary: Option<TeamTrendSummary>,
}

impl TeamTrendReport {
    /// Per-session average points, in chronological order. This is the series
    /// the team chart plots.
    pub fn average_series(&self) -> Vec<f64> {
        self.session_stats
            .iter()
            .map(|s| s.avg_points_per_player)
            .collect()
    }
}

/// One entry in a player's session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSessionEntry {
    pub session_id: SessionId,
    pub session_name: String,
    pub session_date: Option<NaiveDate>,
    pub points: f64,
}

/// Accumulated statistics for one player across all their records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStat {
    pub player_id: AthleteId,
    pub player_name: String,
    pub total_points: f64,
    pub sessions_participated: u32,

    /// total_points / sessions_participated, rounded to 2 decimals
    pub average_points: f64,

    /// Full participating-session history, chronological
    pub sessions: Vec<PlayerSessionEntry>,
}

/// Roll-up over the ranked player list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRankingSummary {
    pub total_players: u32,
    pub highest_average: f64,
    pub lowest_average: f64,

    /// Mean of the per-player averages
    pub overall_average: f64,

    /// First player after the descending sort by average
    pub top_performer: PlayerStat,

    pub total_points_all_players: f64,
    pub average_sessions_per_player: f64,

    /// highest_average - lowest_average, rounded to 2 decimals
    pub performance_spread: f64,
}

/// Player ranking output, sorted descending by average points.
/// `summary` is `None` when no record had a participating athlete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRankingReport {
    pub player_stats: Vec<PlayerStat>,
    pub summary: Option<PlayerRankingSummary>,
}

impl PlayerRankingReport {
    /// Look up a player by name, case-insensitively.
    pub fn get_player(&self, name: &str) -> Option<&PlayerStat> {
        self.player_stats
            .iter()
            .find(|p| p.player_name.eq_ignore_ascii_case(name))
    }
}

/// One session's full stat line for a single athlete, post-coercion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub session_id: SessionId,
    pub session_name: String,
    pub session_date: Option<NaiveDate>,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub turnovers: f64,
    pub fouls: f64,
    pub rpe: f64,
    pub attendance: String,
}

/// Total and 2-decimal average for one metric.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MetricSummary {
    pub total: f64,
    pub average: f64,
}

/// Roll-up over one athlete's participating sessions.
///
/// Best/worst performance is judged by points. When several sessions share
/// the max/min, the earliest one (after the ascending date sort) wins; the
/// reduction uses strict comparisons so the first hit is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteSummary {
    pub sessions_played: u32,
    pub points: MetricSummary,
    pub rebounds: MetricSummary,
    pub assists: MetricSummary,
    pub turnovers: MetricSummary,
    pub fouls: MetricSummary,
    pub rpe: MetricSummary,
    pub best_performance: SessionMetrics,
    pub worst_performance: SessionMetrics,
    pub points_consistency: f64,
    pub rebounds_consistency: f64,
    pub assists_consistency: f64,
}

/// Athlete multi-metric output: chronological per-session metrics plus a
/// summary. `summary` is `None` when the athlete has no participating records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteMetricsReport {
    pub session_metrics: Vec<SessionMetrics>,
    pub summary: Option<AthleteSummary>,
}

impl AthleteMetricsReport {
    /// Extract one metric as a plottable series, chronological.
    pub fn metric_series(&self, metric: Metric) -> Vec<f64> {
        self.session_metrics
            .iter()
            .map(|m| metric.value_of(m))
            .collect()
    }
}

/// The metrics tracked per athlete per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Points,
    Rebounds,
    Assists,
    Turnovers,
    Fouls,
    Rpe,
}

impl Metric {
    /// Parse a metric name (e.g. a query parameter).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "points" => Some(Metric::Points),
            "rebounds" => Some(Metric::Rebounds),
            "assists" => Some(Metric::Assists),
            "turnovers" => Some(Metric::Turnovers),
            "fouls" => Some(Metric::Fouls),
            "rpe" => Some(Metric::Rpe),
            _ => None,
        }
    }

    /// Read this metric's value off a session stat line.
    pub fn value_of(&self, metrics: &SessionMetrics) -> f64 {
        match self {
            Metric::Points => metrics.points,
            Metric::Rebounds => metrics.rebounds,
            Metric::Assists => metrics.assists,
            Metric::Turnovers => metrics.turnovers,
            Metric::Fouls => metrics.fouls,
            Metric::Rpe => metrics.rpe,
        }
    }
}
