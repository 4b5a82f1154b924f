//! Stream endpoints under /api/v1/streams
//!
//! Each handler validates input before touching the repository and runs the
//! repository call under the request deadline.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repos::{with_deadline, Stream};
use crate::http::error::ApiError;
use crate::http::extractors::{StreamId, ValidJson};
use crate::http::server::AppState;
use crate::models::{StreamDescription, StreamTitle, ValidationError};

/// Create stream request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStreamRequest {
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Full stream representation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResponse {
    pub stream_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

/// List entry; description is left out
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSummary {
    pub stream_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: String,
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl From<Stream> for StreamResponse {
    fn from(s: Stream) -> Self {
        Self {
            stream_id: s.stream_id,
            user_id: s.user_id,
            title: s.title,
            description: s.description,
            created_at: timestamp(s.created_at),
        }
    }
}

impl From<Stream> for StreamSummary {
    fn from(s: Stream) -> Self {
        Self {
            stream_id: s.stream_id,
            user_id: s.user_id,
            title: s.title,
            created_at: timestamp(s.created_at),
        }
    }
}

/// GET /api/v1/streams - list all streams, newest first
async fn list_streams(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StreamSummary>>, ApiError> {
    let streams = with_deadline(state.request_timeout, state.streams.find_all()).await?;

    Ok(Json(streams.into_iter().map(StreamSummary::from).collect()))
}

/// POST /api/v1/streams - register a new stream
async fn create_stream(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateStreamRequest>,
) -> Result<(StatusCode, Json<StreamResponse>), ApiError> {
    let user_id = Uuid::parse_str(&req.user_id)
        .map_err(|_| ValidationError::InvalidFormat { field: "userId" })?;
    let title = StreamTitle::new(&req.title)?;
    let description = StreamDescription::new(&req.description)?;

    let stream = Stream::new(user_id, title, description);
    with_deadline(state.request_timeout, state.streams.create(&stream)).await?;

    tracing::info!(stream_id = %stream.stream_id, user_id = %stream.user_id, "stream created");
    Ok((StatusCode::CREATED, Json(StreamResponse::from(stream))))
}

/// GET /api/v1/streams/{streamId} - get a single stream
async fn get_stream(
    State(state): State<Arc<AppState>>,
    StreamId(id): StreamId,
) -> Result<Json<StreamResponse>, ApiError> {
    let stream = with_deadline(state.request_timeout, state.streams.find_by_id(id))
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "stream",
            id: id.to_string(),
        })?;

    Ok(Json(StreamResponse::from(stream)))
}

/// DELETE /api/v1/streams/{streamId} - delete a stream
///
/// Answers 204 whether or not the stream existed.
async fn delete_stream(
    State(state): State<Arc<AppState>>,
    StreamId(id): StreamId,
) -> Result<StatusCode, ApiError> {
    let removed = with_deadline(state.request_timeout, state.streams.delete(id)).await?;
    if removed == 0 {
        tracing::debug!(stream_id = %id, "delete matched no stream");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Stream routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/streams", get(list_streams).post(create_stream))
        .route(
            "/api/v1/streams/{stream_id}",
            get(get_stream).delete(delete_stream),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_are_utc_rfc3339() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(timestamp(at), "2026-01-02T03:04:05Z");
    }

    #[test]
    fn description_defaults_to_empty() {
        let req: CreateStreamRequest =
            serde_json::from_str(r#"{"userId":"x","title":"t"}"#).unwrap();
        assert_eq!(req.description, "");
    }

    #[test]
    fn summary_omits_description() {
        let stream = Stream::new(
            Uuid::new_v4(),
            StreamTitle::new("t").unwrap(),
            StreamDescription::new("secret").unwrap(),
        );
        let json = serde_json::to_value(StreamSummary::from(stream)).unwrap();

        assert!(json.get("description").is_none());
        assert!(json.get("streamId").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
