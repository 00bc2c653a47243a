//! Round builders shared by unit tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::types::{CourseRatings, PlayerId, Round, RoundId, TeeRating};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Regular tees rate 72.0/113 and red tees 70.0/113, so differentials are gross - 72 / gross - 70.
pub fn flat_course() -> CourseRatings {
    CourseRatings {
        id: 1,
        name: "Lakeside".to_string(),
        tees: BTreeMap::from([
            ("regular".to_string(), TeeRating::new(72.0, 113.0)),
            ("red".to_string(), TeeRating::new(70.0, 113.0)),
        ]),
    }
}

pub fn round(id: RoundId, player_id: PlayerId, on: &str, gross: i32) -> Round {
    Round {
        id,
        player_id,
        event_id: id,
        event_name: format!("Event {id}"),
        event_date: date(on),
        sequence: id,
        out_score: None,
        in_score: None,
        total_score: Some(gross),
        course: Some(flat_course()),
    }
}

pub fn round_without_course(id: RoundId, player_id: PlayerId, on: &str, gross: i32) -> Round {
    Round {
        course: None,
        ..round(id, player_id, on, gross)
    }
}
