use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::handicap::{EventId, IndexValue, PlayerId, RankMode, RankedResult, RoundId, TrendPoint};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListItem {
    pub player_id: PlayerId,
    pub name: String,
    pub category: Option<String>,
    pub current_index: IndexValue,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfileResponse {
    pub player_id: PlayerId,
    pub name: String,
    pub category: Option<String>,
    pub tee: String,
    pub current_index: IndexValue,
    pub rounds_played: usize,
    pub history: Vec<TrendPoint>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexResponse {
    pub player_id: PlayerId,
    pub as_of: Option<NaiveDate>,
    pub index: IndexValue,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResponse {
    pub player_id: PlayerId,
    pub points: Vec<TrendPoint>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListItem {
    pub event_id: EventId,
    pub name: String,
    pub event_date: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResultsResponse {
    pub event_id: EventId,
    pub name: String,
    pub event_date: NaiveDate,
    pub mode: RankMode,
    pub results: Vec<RankedResult>,
}

/// Replacement values for an entered score.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCorrection {
    pub out_score: Option<i32>,
    pub in_score: Option<i32>,
    pub total_score: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResponse {
    pub score_id: RoundId,
    pub player_id: PlayerId,
    pub current_index: IndexValue,
}
