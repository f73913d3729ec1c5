//! JSON boundary API
//!
//! String-in, string-out entry points for hosts that talk JSON (UI shells,
//! the CLI, storage bridges). Every function answers with an
//! [`ApiResponse`] envelope; malformed input yields an error envelope and
//! never a panic.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::TrackerConfig;
use crate::context::ViewingContext;
use crate::error::CoreError;
use crate::live::capture::{LogStats, TacticalEvent};
use crate::live::finalizer::{capture_score, finalize};
use crate::models::{PendingWrite, ScoreRecord, SessionDescriptor, Subject};
use crate::scoring::{rank_subjects, seed_averages, summarize_subject, RankedSubject, SeedGroups, SubjectSummary};
use crate::squad::{select_squad, SquadSelection};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

/// Structured API error with codes and details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_details(code: &str, message: &str, details: HashMap<String, serde_json::Value>) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: Some(details) }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        Self::new(error.code(), &error.to_string())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Profile summary of one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub schema_version: Option<String>,
    pub subject_id: String,
    #[serde(default)]
    pub history: Vec<ScoreRecord>,
    pub context: ViewingContext,
    #[serde(default)]
    pub config: Option<TrackerConfig>,
}

/// Ranking of every visible subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub schema_version: Option<String>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub history: Vec<ScoreRecord>,
    pub context: ViewingContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub ranked: Vec<RankedSubject>,
}

/// Best XI over the viewing window.
pub type SquadRequest = RankRequest;

/// Form pre-fill for a new manual record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRequest {
    pub schema_version: Option<String>,
    pub subject_id: String,
    #[serde(default)]
    pub history: Vec<ScoreRecord>,
    #[serde(default)]
    pub config: Option<TrackerConfig>,
}

/// Turn a finished capture log into a record ready for storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeRequest {
    pub schema_version: Option<String>,
    pub subject_id: String,
    pub session: SessionDescriptor,
    #[serde(default)]
    pub events: Vec<TacticalEvent>,
    #[serde(default)]
    pub config: Option<TrackerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeResponse {
    pub score: f64,
    pub stats: LogStats,
    pub write: PendingWrite,
}

fn respond<T: Serialize>(response: ApiResponse<T>) -> String {
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

fn fail<T: Serialize>(error: ApiError) -> String {
    respond::<T>(ApiResponse::error(error))
}

fn parse_request<R: DeserializeOwned>(request_json: &str, name: &str) -> Result<R, ApiError> {
    serde_json::from_str(request_json).map_err(|e| {
        error!("Failed to parse {}: {}", name, e);
        ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e))
    })
}

fn require_subject(subject_id: &str) -> Result<(), ApiError> {
    if subject_id.trim().is_empty() {
        return Err(ApiError::new("INVALID_SUBJECT_ID", "Subject ID must not be empty"));
    }
    Ok(())
}

/// Request config if given, otherwise `PITCHSIDE_CONFIG_PATH` or the default.
fn resolve_config(config: Option<TrackerConfig>) -> Result<TrackerConfig, ApiError> {
    let config = match config {
        Some(config) => config,
        None => TrackerConfig::from_env_or_default().map_err(|e| {
            error!("Failed to load tracker config from environment: {}", e);
            ApiError::from(e)
        })?,
    };
    config.validate().map_err(|e| {
        warn!("Request config rejected: {}", e);
        ApiError::from(e)
    })?;
    Ok(config)
}

/// Ratings outside [0, 10] are kept as-is; they are only reported.
fn warn_out_of_range(history: &[ScoreRecord]) {
    for record in history {
        let groups = [Some(&record.technical), Some(&record.physical), record.tactical.as_ref()];
        for group in groups.into_iter().flatten() {
            let keys = group.out_of_range_keys();
            if !keys.is_empty() {
                warn!("Record {} has out-of-range ratings for {:?}", record.id, keys);
            }
        }
    }
}

/// Summarize one subject from JSON request string
///
/// # Returns
/// JSON string containing ApiResponse<SubjectSummary>
pub fn summarize_subject_json(request_json: &str) -> String {
    info!("Processing subject summary request");

    let request: SummaryRequest = match parse_request(request_json, "SummaryRequest") {
        Ok(req) => req,
        Err(error) => return fail::<SubjectSummary>(error),
    };
    if let Err(error) = require_subject(&request.subject_id) {
        return fail::<SubjectSummary>(error);
    }
    let config = match resolve_config(request.config) {
        Ok(config) => config,
        Err(error) => return fail::<SubjectSummary>(error),
    };

    warn_out_of_range(&request.history);
    let summary = summarize_subject(&request.subject_id, &request.history, &request.context, &config);
    debug!("Summary for {}: {} records in window", summary.subject_id, summary.record_count);
    respond(ApiResponse::success(summary))
}

/// Rank subjects from JSON request string
///
/// # Returns
/// JSON string containing ApiResponse<RankResponse>
pub fn rank_subjects_json(request_json: &str) -> String {
    info!("Processing subject ranking request");

    let request: RankRequest = match parse_request(request_json, "RankRequest") {
        Ok(req) => req,
        Err(error) => return fail::<RankResponse>(error),
    };

    warn_out_of_range(&request.history);
    let ranked = rank_subjects(&request.subjects, &request.history, &request.context);
    debug!("Ranked {} of {} subjects", ranked.len(), request.subjects.len());
    respond(ApiResponse::success(RankResponse { ranked }))
}

/// Pick the best XI from JSON request string
///
/// # Returns
/// JSON string containing ApiResponse<SquadSelection>
pub fn select_squad_json(request_json: &str) -> String {
    info!("Processing squad selection request");

    let request: SquadRequest = match parse_request(request_json, "SquadRequest") {
        Ok(req) => req,
        Err(error) => return fail::<SquadSelection>(error),
    };

    warn_out_of_range(&request.history);
    let ranked = rank_subjects(&request.subjects, &request.history, &request.context);
    let squad = select_squad(&ranked, &request.context);
    if !squad.is_complete() {
        warn!("Squad incomplete: {} of {} slots filled", squad.filled_count(), squad.slots.len());
    }
    respond(ApiResponse::success(squad))
}

/// Seed values for a new record from JSON request string
///
/// # Returns
/// JSON string containing ApiResponse<SeedGroups>
pub fn seed_record_json(request_json: &str) -> String {
    info!("Processing record seed request");

    let request: SeedRequest = match parse_request(request_json, "SeedRequest") {
        Ok(req) => req,
        Err(error) => return fail::<SeedGroups>(error),
    };
    if let Err(error) = require_subject(&request.subject_id) {
        return fail::<SeedGroups>(error);
    }
    let config = match resolve_config(request.config) {
        Ok(config) => config,
        Err(error) => return fail::<SeedGroups>(error),
    };

    let past: Vec<ScoreRecord> =
        request.history.into_iter().filter(|r| r.subject_id == request.subject_id).collect();
    warn_out_of_range(&past);
    debug!("Seeding {} from {} past records", request.subject_id, past.len());
    respond(ApiResponse::success(seed_averages(&config.schema, &past, config.seed_default)))
}

/// Finalize a capture log from JSON request string
///
/// # Returns
/// JSON string containing ApiResponse<FinalizeResponse>
pub fn finalize_capture_json(request_json: &str) -> String {
    info!("Processing capture finalization request");

    let request: FinalizeRequest = match parse_request(request_json, "FinalizeRequest") {
        Ok(req) => req,
        Err(error) => return fail::<FinalizeResponse>(error),
    };
    if let Err(error) = require_subject(&request.subject_id) {
        return fail::<FinalizeResponse>(error);
    }
    if request.session.parsed_date().is_none() {
        let mut details = HashMap::new();
        details.insert("date".to_string(), serde_json::Value::String(request.session.date.clone()));
        return fail::<FinalizeResponse>(ApiError::with_details(
            "INVALID_SESSION_DATE",
            "Session date must be YYYY-MM-DD",
            details,
        ));
    }
    let config = match resolve_config(request.config) {
        Ok(config) => config,
        Err(error) => return fail::<FinalizeResponse>(error),
    };

    let mut stats = LogStats::default();
    for event in &request.events {
        stats.record(event);
    }
    let record = finalize(&request.subject_id, request.session.session_ref(), &request.events, &config);
    let response = FinalizeResponse {
        score: capture_score(&request.events, config.neutral_score),
        stats,
        write: PendingWrite { record, session: request.session },
    };
    respond(ApiResponse::success(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::vocabulary::{CaptureResult, Phase, ZoneId};
    use crate::live::RecordOrigin;
    use crate::models::{AttributeGroup, Position, SessionRef};
    use crate::squad::SlotRole;
    use serde_json::json;
    use uuid::Uuid;

    fn record(subject: &str, date: &str, value: f64) -> ScoreRecord {
        ScoreRecord::manual(
            subject,
            SessionRef { session_id: None, date: date.to_string() },
            AttributeGroup::from_pairs([("passing", value), ("shooting", value)]),
            AttributeGroup::from_pairs([("speed", value)]),
            None,
        )
    }

    fn context() -> serde_json::Value {
        json!({ "today": "2025-05-10", "period": { "kind": "all" } })
    }

    #[test]
    fn test_malformed_request_returns_error_envelope() {
        let response = summarize_subject_json("{not json");
        let result: ApiResponse<SubjectSummary> = serde_json::from_str(&response).unwrap();

        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.error.unwrap().code, "INVALID_JSON");
        assert_eq!(result.schema_version, "v1");
    }

    #[test]
    fn test_summary_workflow() {
        let request = json!({
            "subject_id": "p1",
            "history": [record("p1", "2025-05-01", 6.0), record("p1", "2025-05-08", 8.0), record("p2", "2025-05-08", 2.0)],
            "context": context(),
        });
        let response = summarize_subject_json(&request.to_string());
        let result: ApiResponse<SubjectSummary> = serde_json::from_str(&response).unwrap();

        assert!(result.success);
        let summary = result.data.unwrap();
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.overall_average, 7.0);
        assert_eq!(summary.evolution.len(), 2);
    }

    #[test]
    fn test_summary_rejects_blank_subject() {
        let request = json!({ "subject_id": "  ", "context": context() });
        let result: ApiResponse<SubjectSummary> =
            serde_json::from_str(&summarize_subject_json(&request.to_string())).unwrap();
        assert_eq!(result.error.unwrap().code, "INVALID_SUBJECT_ID");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = TrackerConfig::default();
        config.ranking_depth = 0;
        let request = json!({ "subject_id": "p1", "history": [], "config": config });
        let result: ApiResponse<SeedGroups> = serde_json::from_str(&seed_record_json(&request.to_string())).unwrap();
        assert_eq!(result.error.unwrap().code, "INVALID_CONFIG");
    }

    #[test]
    fn test_out_of_range_values_are_kept() {
        let request = json!({
            "subject_id": "p1",
            "history": [record("p1", "2025-05-01", 12.0)],
            "context": context(),
        });
        let result: ApiResponse<SubjectSummary> =
            serde_json::from_str(&summarize_subject_json(&request.to_string())).unwrap();
        assert_eq!(result.data.unwrap().overall_average, 12.0);
    }

    #[test]
    fn test_rank_and_squad() {
        let subjects = vec![
            Subject::new("gk", "Keeper", Position::Goalkeeper),
            Subject::new("st1", "Nine", Position::Striker),
            Subject::new("st2", "Ten", Position::Striker),
        ];
        let history = vec![record("gk", "2025-05-01", 6.0), record("st1", "2025-05-01", 5.0), record("st2", "2025-05-01", 9.0)];
        let request = json!({ "subjects": subjects, "history": history, "context": context() }).to_string();

        let ranked: ApiResponse<RankResponse> = serde_json::from_str(&rank_subjects_json(&request)).unwrap();
        let ids: Vec<String> = ranked.data.unwrap().ranked.into_iter().map(|r| r.subject.id).collect();
        assert_eq!(ids, vec!["st2", "gk", "st1"]);

        let squad: ApiResponse<SquadSelection> = serde_json::from_str(&select_squad_json(&request)).unwrap();
        let squad = squad.data.unwrap();
        assert_eq!(squad.slots.len(), 11);
        assert_eq!(squad.filled_count(), 2);
        assert_eq!(squad.slot(SlotRole::Striker).and_then(|s| s.subject.as_ref()).map(|r| r.subject.id.as_str()), Some("st2"));
    }

    #[test]
    fn test_seed_only_uses_own_history() {
        let request = json!({
            "subject_id": "p1",
            "history": [record("p1", "2025-05-01", 6.0), record("p1", "2025-05-02", 7.0), record("p2", "2025-05-02", 1.0)],
        });
        let result: ApiResponse<SeedGroups> = serde_json::from_str(&seed_record_json(&request.to_string())).unwrap();
        let seed = result.data.unwrap();
        assert_eq!(seed.technical.get("passing"), Some(6.5));
        // no history for this key
        assert_eq!(seed.technical.get("dribbling"), Some(5.0));
        assert!(seed.tactical.is_some());
    }

    #[test]
    fn test_finalize_capture() {
        let events: Vec<TacticalEvent> = [CaptureResult::Positive, CaptureResult::Negative]
            .into_iter()
            .map(|result| TacticalEvent {
                id: Uuid::new_v4(),
                timestamp_label: "12:30".to_string(),
                elapsed_seconds: 750,
                period: 1,
                phase: Phase::Defensive,
                action: "tackle".to_string(),
                result,
                zone_id: ZoneId::new(5),
            })
            .collect();
        let request = json!({
            "subject_id": "p1",
            "session": { "date": "2025-05-10", "team_id": "t1" },
            "events": events,
        });
        let result: ApiResponse<FinalizeResponse> =
            serde_json::from_str(&finalize_capture_json(&request.to_string())).unwrap();

        let data = result.data.unwrap();
        assert_eq!(data.score, 5.0);
        assert_eq!(data.stats.total, 2);
        assert_eq!(data.stats.defensive, 2);
        assert_eq!(data.write.record.session.date, "2025-05-10");
        assert_eq!(data.write.session.team_id, "t1");
        assert_eq!(data.write.record.zone_points.len(), 2);
        assert_eq!(RecordOrigin::of(&data.write.record), RecordOrigin::TacticalCapture);
    }

    #[test]
    fn test_finalize_rejects_bad_date() {
        let request = json!({ "subject_id": "p1", "session": { "date": "10/05/2025", "team_id": "t1" } });
        let result: ApiResponse<FinalizeResponse> =
            serde_json::from_str(&finalize_capture_json(&request.to_string())).unwrap();
        let error = result.error.unwrap();
        assert_eq!(error.code, "INVALID_SESSION_DATE");
        assert!(error.details.unwrap().contains_key("date"));
    }
}
