use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::handicap::{CourseId, EventId, PlayerId, Round, RoundId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Drives tee selection (e.g. "M"/"F"); see `TeeSettings`.
    #[serde(default)]
    pub category: Option<String>,
    /// Bumped whenever anything feeding this player's index changes.
    #[serde(default)]
    pub revision: i64,
}

impl Player {
    pub fn unknown(id: PlayerId) -> Self {
        Self {
            id,
            name: "(unknown)".to_string(),
            category: None,
            revision: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub event_date: NaiveDate,
    #[serde(default)]
    pub course_id: Option<CourseId>,
}

/// A recorded score as entered, before it is joined with its event and course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: RoundId,
    pub player_id: PlayerId,
    pub event_id: EventId,
    #[serde(default)]
    pub out_score: Option<i32>,
    #[serde(default)]
    pub in_score: Option<i32>,
    #[serde(default)]
    pub total_score: Option<i32>,
}

/// One line of an event's field.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub player: Player,
    pub round: Round,
}
