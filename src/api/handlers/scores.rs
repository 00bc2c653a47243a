use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::AppState;
use crate::api::models::{CorrectionResponse, ScoreCorrection};
use crate::handicap::RoundId;

/// Corrects an entered score and answers with the owner's recomputed index.
pub async fn put_score_correction(
    State(state): State<Arc<AppState>>,
    Path(score_id): Path<RoundId>,
    Json(correction): Json<ScoreCorrection>,
) -> impl IntoResponse {
    let corrected = state.service.correct_score(
        score_id,
        correction.out_score,
        correction.in_score,
        correction.total_score,
    );
    let player_id = match corrected {
        Ok(Some(player_id)) => player_id,
        Ok(None) => return (StatusCode::NOT_FOUND, format!("Score {} not found", score_id)).into_response(),
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Update Error: {}", e)).into_response(),
    };

    match state.service.current_index(player_id) {
        Ok(Some(current_index)) => Json(CorrectionResponse {
            score_id,
            player_id,
            current_index,
        })
        .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("Player {} not found", player_id)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e)).into_response(),
    }
}
