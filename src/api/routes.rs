use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    events::{get_event_results, get_events},
    players::{get_player_detail, get_player_index, get_player_trend, get_players},
    scores::put_score_correction,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(get_players))
        .route("/api/players/:id", get(get_player_detail))
        .route("/api/players/:id/index", get(get_player_index))
        .route("/api/players/:id/trend", get(get_player_trend))
        .route("/api/events", get(get_events))
        .route("/api/events/:id/results", get(get_event_results))
        .route("/api/scores/:id", put(put_score_correction))
        .with_state(state)
}
