use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::SqliteLeague;
use crate::services::HandicapService;

pub mod events;
pub mod players;
pub mod scores;

pub struct AppState {
    pub service: HandicapService<SqliteLeague>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexParams {
    pub as_of: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct ResultsParams {
    pub mode: Option<String>,
}
