use std::convert::Infallible;

use axum::extract::State;
use axum::http::header;
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use futures_util::StreamExt;
use tracing::warn;

use crate::application::StreamNotifier;

#[derive(Clone)]
pub struct StreamState {
    pub notifier: StreamNotifier,
}

#[utoipa::path(
    get,
    path = "/stream",
    tag = "Stream",
    responses(
        (status = 200, description = "Event stream", content_type = "text/event-stream", body = String)
    )
)]
pub async fn stream_events(State(state): State<StreamState>) -> impl IntoResponse {
    let events = state.notifier.subscribe().map(|notification| {
        let event = Event::default().json_data(&notification).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to encode notification");
            Event::default().data(notification.message)
        });
        Ok::<_, Infallible>(event)
    });

    ([(header::CACHE_CONTROL, "no-cache")], Sse::new(events))
}
