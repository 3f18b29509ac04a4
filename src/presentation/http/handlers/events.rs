//! Realtime Event Handlers
//!
//! Read access to the hub's recent-event window so the dashboard can catch
//! up after (re)connecting without waiting for the next push.

use axum::{extract::State, Json};

use crate::application::dto::response::EventListResponse;
use crate::presentation::http::extractors::CurrentAdmin;
use crate::startup::AppState;

/// Recent realtime events in arrival order, oldest first.
pub async fn recent_events(
    State(state): State<AppState>,
    _admin: CurrentAdmin,
) -> Json<EventListResponse> {
    Json(EventListResponse {
        events: state.hub.recent_events(),
    })
}
