use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, ResultsParams};
use crate::api::models::{EventListItem, EventResultsResponse};
use crate::domain::LeagueSource;
use crate::handicap::{EventId, RankMode};

pub async fn get_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let events = match state.service.source().events() {
        Ok(events) => events,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };

    let items: Vec<EventListItem> = events
        .into_iter()
        .map(|event| EventListItem {
            event_id: event.id,
            name: event.name,
            event_date: event.event_date,
        })
        .collect();

    Json(items).into_response()
}

pub async fn get_event_results(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<EventId>,
    Query(params): Query<ResultsParams>,
) -> impl IntoResponse {
    let mode = match params.mode.as_deref().map(str::parse::<RankMode>) {
        None => RankMode::default(),
        Some(Ok(mode)) => mode,
        Some(Err(e)) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };

    match state.service.tournament_results(event_id, mode) {
        Ok(Some(results)) => Json(EventResultsResponse {
            event_id: results.event.id,
            name: results.event.name,
            event_date: results.event.event_date,
            mode: results.mode,
            results: results.results,
        })
        .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("Event {} not found", event_id)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}
