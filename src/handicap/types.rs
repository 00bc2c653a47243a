use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type PlayerId = i64;
pub type EventId = i64;
pub type RoundId = i64;
pub type CourseId = i64;
pub type IndexValue = f64;

/// Difficulty profile of one set of tees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeeRating {
    pub course_rating: f64,
    pub slope: f64,
}

impl TeeRating {
    pub fn new(course_rating: f64, slope: f64) -> Self {
        Self { course_rating, slope }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRatings {
    pub id: CourseId,
    pub name: String,
    #[serde(default)]
    pub tees: BTreeMap<String, TeeRating>,
}

impl CourseRatings {
    pub fn tee(&self, name: &str) -> Option<&TeeRating> {
        self.tees.get(name)
    }
}

/// One recorded round, joined with its event and (optionally) the event's course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub player_id: PlayerId,
    pub event_id: EventId,
    pub event_name: String,
    pub event_date: NaiveDate,
    /// Insertion order; orders same-day rounds.
    pub sequence: i64,
    pub out_score: Option<i32>,
    pub in_score: Option<i32>,
    pub total_score: Option<i32>,
    pub course: Option<CourseRatings>,
}

impl Round {
    /// Recorded total, or OUT + IN when only the halves were entered.
    pub fn gross(&self) -> Option<i32> {
        self.total_score.or(match (self.out_score, self.in_score) {
            (Some(out), Some(inn)) => out.checked_add(inn),
            _ => None,
        })
    }

    pub fn tee_rating(&self, tee: &str) -> Option<&TeeRating> {
        self.course.as_ref().and_then(|c| c.tee(tee))
    }
}

/// One row of a player's handicap history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub round_id: RoundId,
    pub event_id: EventId,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub gross: Option<i32>,
    pub differential: Option<f64>,
    pub index_after: Option<IndexValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMode {
    #[default]
    Net,
    Gross,
}

impl RankMode {
    pub fn as_str(&self) -> &str {
        match self {
            RankMode::Net => "net",
            RankMode::Gross => "gross",
        }
    }
}

impl fmt::Display for RankMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "net" => Ok(RankMode::Net),
            "gross" => Ok(RankMode::Gross),
            other => Err(format!("unknown ranking mode '{other}', expected 'net' or 'gross'")),
        }
    }
}

/// A participant's tournament line before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub player_id: PlayerId,
    pub name: String,
    pub category: Option<String>,
    /// Index as of the event date; `None` when the player had no qualifying prior round.
    pub handicap: Option<IndexValue>,
    pub out_score: Option<i32>,
    pub in_score: Option<i32>,
    pub gross: Option<i32>,
    pub net: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub rank: usize,
    #[serde(flatten)]
    pub card: ScoreCard,
}
