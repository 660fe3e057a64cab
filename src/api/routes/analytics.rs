use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate;
use crate::chart::{build_chart_data, ChartData};
use crate::models::{
    AthleteSessionRecord, Metric, PlayerRankingSummary, PlayerStat, SessionMetrics, SessionStat,
    TeamTrendSummary, TrainingSession,
};
use crate::storage;

fn load_data(
    state: &AppState,
) -> Result<(Vec<TrainingSession>, Vec<AthleteSessionRecord>), ApiError> {
    let sessions = storage::load_sessions(&state.storage)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let records =
        storage::load_records(&state.storage).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((sessions, records))
}

// ── Team Trends Endpoint ────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TeamTrendsResponse {
    pub session_stats: Vec<SessionStat>,
    pub summary: Option<TeamTrendSummary>,
    pub chart: ChartData,
}

pub async fn team_trends(
    State(state): State<AppState>,
) -> Result<Json<TeamTrendsResponse>, ApiError> {
    let (sessions, records) = load_data(&state)?;
    let report = calculate::team_trends(&sessions, &records);

    let dates: Vec<_> = report.session_stats.iter().map(|s| s.session_date).collect();
    let chart = build_chart_data(&dates, &report.average_series());

    Ok(Json(TeamTrendsResponse {
        session_stats: report.session_stats,
        summary: report.summary,
        chart,
    }))
}

// ── Player Rankings Endpoint ────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PlayerRankingsParams {
    /// Restrict the response to one player, looked up by name
    pub player: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerRankingsResponse {
    pub player_stats: Vec<PlayerStat>,
    pub summary: Option<PlayerRankingSummary>,
}

pub async fn player_rankings(
    State(state): State<AppState>,
    Query(params): Query<PlayerRankingsParams>,
) -> Result<Json<PlayerRankingsResponse>, ApiError> {
    let (sessions, records) = load_data(&state)?;
    let report = calculate::player_rankings(&sessions, &records);

    if let Some(ref name) = params.player {
        let player = report
            .get_player(name)
            .ok_or_else(|| ApiError::NotFound(format!("No player named: {}", name)))?
            .clone();
        return Ok(Json(PlayerRankingsResponse {
            player_stats: vec![player],
            summary: report.summary,
        }));
    }

    Ok(Json(PlayerRankingsResponse {
        player_stats: report.player_stats,
        summary: report.summary,
    }))
}

// ── Athlete Metrics Endpoint ────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AthleteMetricsResponse {
    pub athlete_id: String,
    pub athlete_name: String,
    pub session_metrics: Vec<SessionMetrics>,
    pub summary: Option<crate::models::AthleteSummary>,
}

pub async fn athlete_metrics(
    State(state): State<AppState>,
    Path(athlete_id): Path<String>,
) -> Result<Json<AthleteMetricsResponse>, ApiError> {
    let (sessions, records) = load_data(&state)?;

    // 404 only when no record mentions the athlete at all; an athlete whose
    // records are all non-participating gets an empty report instead.
    let athlete_name = records
        .iter()
        .find(|r| r.athlete_id.as_str() == athlete_id)
        .map(|r| r.athlete_name.clone())
        .ok_or_else(|| ApiError::NotFound(format!("No records for athlete: {}", athlete_id)))?;

    let report = calculate::athlete_metrics(&athlete_id, &sessions, &records);

    Ok(Json(AthleteMetricsResponse {
        athlete_id,
        athlete_name,
        session_metrics: report.session_metrics,
        summary: report.summary,
    }))
}

// ── Athlete Chart Endpoint ──────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AthleteChartParams {
    /// Metric to plot (default: points)
    pub metric: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AthleteChartResponse {
    pub athlete_id: String,
    pub metric: Metric,
    pub chart: ChartData,
}

pub async fn athlete_chart(
    State(state): State<AppState>,
    Path(athlete_id): Path<String>,
    Query(params): Query<AthleteChartParams>,
) -> Result<Json<AthleteChartResponse>, ApiError> {
    let metric = match params.metric.as_deref() {
        None => Metric::Points,
        Some(s) => {
            Metric::parse(s).ok_or_else(|| ApiError::BadRequest(format!("Unknown metric: {}", s)))?
        }
    };

    let (sessions, records) = load_data(&state)?;

    if !records.iter().any(|r| r.athlete_id.as_str() == athlete_id) {
        return Err(ApiError::NotFound(format!(
            "No records for athlete: {}",
            athlete_id
        )));
    }

    let report = calculate::athlete_metrics(&athlete_id, &sessions, &records);
    let dates: Vec<_> = report
        .session_metrics
        .iter()
        .map(|m| m.session_date)
        .collect();
    let chart = build_chart_data(&dates, &report.metric_series(metric));

    Ok(Json(AthleteChartResponse {
        athlete_id,
        metric,
        chart,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::models::{AthleteSessionRecord, TrainingSession};
    use crate::storage::StorageConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn write_jsonl<T: serde::Serialize>(path: &std::path::Path, items: &[T]) {
        let mut content = String::new();
        for item in items {
            content.push_str(&serde_json::to_string(item).unwrap());
            content.push('\n');
        }
        std::fs::write(path, content).unwrap();
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn make_session(id: &str, name: &str, date: &str) -> TrainingSession {
        serde_json::from_str(&format!(
            r#"{{"id": "{}", "session_name": "{}", "session_date": "{}"}}"#,
            id, name, date
        ))
        .unwrap()
    }

    fn make_record(
        session_id: &str,
        athlete_id: &str,
        name: &str,
        attendance: &str,
        points: f64,
    ) -> AthleteSessionRecord {
        serde_json::from_str(&format!(
            r#"{{"session_id": "{}", "athlete_id": "{}", "athlete_name": "{}",
                "attendance": "{}", "points": {}, "rebounds": 4, "assists": 2,
                "turnovers": 1, "fouls": 2, "rpe": 6}}"#,
            session_id, athlete_id, name, attendance, points
        ))
        .unwrap()
    }

    fn setup_test_state(dir: &std::path::Path) -> AppState {
        AppState {
            storage: Arc::new(StorageConfig::new(dir.to_path_buf())),
        }
    }

    fn seed_basic_data(dir: &std::path::Path) {
        let s1 = make_session("s-1", "Practice 1", "2026-03-02");
        let s2 = make_session("s-2", "Practice 2", "2026-03-09");
        let records = vec![
            make_record("s-1", "a-1", "Jordan", "present", 10.0),
            make_record("s-1", "a-2", "Pippen", "late", 10.0),
            make_record("s-2", "a-1", "Jordan", "present", 20.0),
            make_record("s-2", "a-2", "Pippen", "absent", 0.0),
        ];
        write_jsonl(&dir.join("sessions.jsonl"), &[&s1, &s2]);
        write_jsonl(&dir.join("records.jsonl"), &records);
    }

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_team_trends() {
        let tmp = tempfile::tempdir().unwrap();
        seed_basic_data(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/team").await;
        assert_eq!(status, StatusCode::OK);

        let stats = json["session_stats"].as_array().unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0]["avg_points_per_player"], 10.0);
        assert_eq!(stats[1]["avg_points_per_player"], 20.0);
        assert_eq!(json["summary"]["overall_average"], 15.0);
        assert_eq!(json["chart"]["series"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_team_trends_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/team").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["session_stats"].as_array().unwrap().is_empty());
        assert!(json["summary"].is_null());
    }

    #[tokio::test]
    async fn test_player_rankings() {
        let tmp = tempfile::tempdir().unwrap();
        seed_basic_data(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/players").await;
        assert_eq!(status, StatusCode::OK);

        let players = json["player_stats"].as_array().unwrap();
        assert_eq!(players.len(), 2);
        // Jordan averages 15, Pippen 10 (absent session excluded).
        assert_eq!(players[0]["player_name"], "Jordan");
        assert_eq!(players[0]["average_points"], 15.0);
        assert_eq!(players[1]["sessions_participated"], 1);
        assert_eq!(json["summary"]["top_performer"]["player_name"], "Jordan");
    }

    #[tokio::test]
    async fn test_player_rankings_filter_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        seed_basic_data(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/players?player=pippen").await;
        assert_eq!(status, StatusCode::OK);
        let players = json["player_stats"].as_array().unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0]["player_name"], "Pippen");
    }

    #[tokio::test]
    async fn test_player_rankings_unknown_name() {
        let tmp = tempfile::tempdir().unwrap();
        seed_basic_data(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/players?player=rodman").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_athlete_metrics() {
        let tmp = tempfile::tempdir().unwrap();
        seed_basic_data(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/athletes/a-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["athlete_name"], "Jordan");
        assert_eq!(json["session_metrics"].as_array().unwrap().len(), 2);
        assert_eq!(json["summary"]["points"]["total"], 30.0);
        assert_eq!(json["summary"]["points"]["average"], 15.0);
    }

    #[tokio::test]
    async fn test_athlete_metrics_unknown_athlete() {
        let tmp = tempfile::tempdir().unwrap();
        seed_basic_data(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/athletes/a-99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_athlete_metrics_all_absent_is_empty_not_404() {
        let tmp = tempfile::tempdir().unwrap();
        let s1 = make_session("s-1", "Practice", "2026-03-02");
        let r1 = make_record("s-1", "a-1", "Jordan", "absent", 10.0);
        write_jsonl(&tmp.path().join("sessions.jsonl"), &[&s1]);
        write_jsonl(&tmp.path().join("records.jsonl"), &[&r1]);
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/athletes/a-1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["session_metrics"].as_array().unwrap().is_empty());
        assert!(json["summary"].is_null());
    }

    #[tokio::test]
    async fn test_athlete_chart_default_metric() {
        let tmp = tempfile::tempdir().unwrap();
        seed_basic_data(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/athletes/a-1/chart").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["metric"], "points");
        let series = json["chart"]["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0], 10.0);
        assert_eq!(series[1], 20.0);
        assert_eq!(json["chart"]["show_trend"], false);
    }

    #[tokio::test]
    async fn test_athlete_chart_explicit_metric() {
        let tmp = tempfile::tempdir().unwrap();
        seed_basic_data(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/athletes/a-1/chart?metric=rebounds").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["metric"], "rebounds");
        assert_eq!(json["chart"]["series"][0], 4.0);
    }

    #[tokio::test]
    async fn test_athlete_chart_unknown_metric() {
        let tmp = tempfile::tempdir().unwrap();
        seed_basic_data(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/analytics/athletes/a-1/chart?metric=steals").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_athlete_chart_unknown_athlete() {
        let tmp = tempfile::tempdir().unwrap();
        seed_basic_data(tmp.path());
        let app = build_router(setup_test_state(tmp.path()));

        let (status, _) = get_json(app, "/api/analytics/athletes/a-99/chart").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
