//! HTTP API endpoint handlers.
//!
//! Read-only presence views derived from the connection registry.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use roomcast_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    infrastructure::dto::http::{MemberDetailDto, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List every room with at least one registered member, sorted by name
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let mut rooms: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (_, record) in state.repository.snapshot().await {
        rooms
            .entry(record.room.as_str().to_string())
            .or_default()
            .push(record.username.as_str().to_string());
    }

    let summaries = rooms
        .into_iter()
        .map(|(name, mut members)| {
            members.sort();
            RoomSummaryDto { name, members }
        })
        .collect();

    Json(summaries)
}

/// Get room detail by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let mut members: Vec<MemberDetailDto> = state
        .repository
        .snapshot()
        .await
        .into_iter()
        .filter(|(_, record)| record.room.as_str() == room)
        .map(|(connection_id, record)| MemberDetailDto {
            connection_id: connection_id.as_str().to_string(),
            username: record.username.as_str().to_string(),
            joined_at: timestamp_to_jst_rfc3339(record.joined_at.value())
                .unwrap_or_else(|| record.joined_at.to_string()),
        })
        .collect();

    if members.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }
    members.sort_by(|a, b| a.connection_id.cmp(&b.connection_id));

    Ok(Json(RoomDetailDto {
        name: room,
        members,
    }))
}
