//! Athlete multi-metric calculation: one athlete's full stat history with
//! per-metric totals, averages, best/worst sessions, and consistency scores.

use std::collections::HashMap;

use crate::models::{
    AthleteMetricsReport, AthleteSessionRecord, AthleteSummary, Metric, MetricSummary,
    SessionMetrics, TrainingSession,
};

use super::{consistency_score, round2};

/// Compute the chronological metric history for one athlete, plus a summary.
///
/// Only the athlete's participating records count. Best and worst performance
/// are judged by points; on a tie the earliest session wins.
pub fn athlete_metrics(
    athlete_id: &str,
    sessions: &[TrainingSession],
    records: &[AthleteSessionRecord],
) -> AthleteMetricsReport {
    let session_index: HashMap<&str, &TrainingSession> =
        sessions.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut session_metrics: Vec<SessionMetrics> = records
        .iter()
        .filter(|r| r.athlete_id.as_str() == athlete_id && r.is_participating())
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
            SessionMetrics {
                session_id: r.session_id.clone(),
                session_name,
                session_date,
                points: r.points,
                rebounds: r.rebounds,
                assists: r.assists,
                turnovers: r.turnovers,
                fouls: r.fouls,
                rpe: r.rpe,
                attendance: r.attendance.clone(),
            }
        })
        .collect();

    session_metrics.sort_by_key(|m| (m.session_date.is_none(), m.session_date));

    let summary = build_summary(&session_metrics);
    AthleteMetricsReport {
        session_metrics,
        summary,
    }
}

fn build_summary(session_metrics: &[SessionMetrics]) -> Option<AthleteSummary> {
    if session_metrics.is_empty() {
        return None;
    }
    let count = session_metrics.len();

    let summarize = |metric: Metric| -> MetricSummary {
        let total: f64 = session_metrics.iter().map(|m| metric.value_of(m)).sum();
        MetricSummary {
            total: round2(total),
            average: round2(total / count as f64),
        }
    };

    // Strict comparisons keep the first (earliest) session on ties.
    let mut best = &session_metrics[0];
    let mut worst = &session_metrics[0];
    for m in &session_metrics[1..] {
        if m.points > best.points {
            best = m;
        }
        if m.points < worst.points {
            worst = m;
        }
    }

    let series = |metric: Metric| -> Vec<f64> {
        session_metrics.iter().map(|m| metric.value_of(m)).collect()
    };

    Some(AthleteSummary {
        sessions_played: count as u32,
        points: summarize(Metric::Points),
        rebounds: summarize(Metric::Rebounds),
        assists: summarize(Metric::Assists),
        turnovers: summarize(Metric::Turnovers),
        fouls: summarize(Metric::Fouls),
        rpe: summarize(Metric::Rpe),
        best_performance: best.clone(),
        worst_performance: worst.clone(),
        points_consistency: consistency_score(&series(Metric::Points)),
        rebounds_consistency: consistency_score(&series(Metric::Rebounds)),
        assists_consistency: consistency_score(&series(Metric::Assists)),
    })
}
