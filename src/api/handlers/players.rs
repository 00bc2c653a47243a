use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, IndexParams};
use crate::api::models::{IndexResponse, PlayerListItem, PlayerProfileResponse, TrendResponse};
use crate::handicap::PlayerId;

pub async fn get_players(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let roster = match state.service.roster() {
        Ok(roster) => roster,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    };

    let players: Vec<PlayerListItem> = roster
        .into_iter()
        .map(|(player, current_index)| PlayerListItem {
            player_id: player.id,
            name: player.name,
            category: player.category,
            current_index,
        })
        .collect();

    Json(players).into_response()
}

pub async fn get_player_detail(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<PlayerId>,
) -> impl IntoResponse {
    match state.service.player_profile(player_id) {
        Ok(Some(profile)) => Json(PlayerProfileResponse {
            player_id: profile.player.id,
            name: profile.player.name,
            category: profile.player.category,
            tee: profile.tee,
            current_index: profile.current_index,
            rounds_played: profile.trend.len(),
            history: profile.trend,
        })
        .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("Player {} not found", player_id)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

/// Current index, or the index as of `?asOf=YYYY-MM-DD` when given.
pub async fn get_player_index(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<PlayerId>,
    Query(params): Query<IndexParams>,
) -> impl IntoResponse {
    let index = match params.as_of {
        Some(date) => state.service.index_as_of(player_id, date),
        None => state.service.current_index(player_id),
    };

    match index {
        Ok(Some(index)) => Json(IndexResponse {
            player_id,
            as_of: params.as_of,
            index,
        })
        .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("Player {} not found", player_id)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}

pub async fn get_player_trend(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<PlayerId>,
) -> impl IntoResponse {
    match state.service.trend(player_id) {
        Ok(Some(points)) => Json(TrendResponse { player_id, points }).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("Player {} not found", player_id)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}
