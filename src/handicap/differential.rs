use log::debug;

use super::types::Round;
use crate::config::HandicapSettings;

/// Rating/slope-normalised score of one round, unrounded. Lower is better.
///
/// Returns `None` for non-finite inputs or a non-positive slope; such rounds
/// never reach the aggregation.
pub fn differential(
    gross: f64,
    course_rating: f64,
    slope: f64,
    settings: &HandicapSettings,
) -> Option<f64> {
    if !gross.is_finite() || !course_rating.is_finite() || !slope.is_finite() || slope <= 0.0 {
        return None;
    }
    Some((gross - course_rating) * settings.reference_slope / slope)
}

/// Differential of a recorded round played from `tee`.
pub fn round_differential(round: &Round, tee: &str, settings: &HandicapSettings) -> Option<f64> {
    let Some(gross) = round.gross() else {
        debug!("Round {} has no gross score, skipped", round.id);
        return None;
    };
    let Some(rating) = round.tee_rating(tee) else {
        debug!("Round {} has no '{}' tee rating, skipped", round.id, tee);
        return None;
    };
    let value = differential(f64::from(gross), rating.course_rating, rating.slope, settings);
    if value.is_none() {
        debug!("Round {} has an invalid '{}' tee rating, skipped", round.id, tee);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handicap::types::{CourseRatings, TeeRating};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn settings() -> HandicapSettings {
        HandicapSettings::default()
    }

    #[test]
    fn test_differential_formula() {
        let d = differential(85.0, 72.0, 113.0, &settings()).unwrap();
        assert!((d - 13.0).abs() < 1e-12);

        let d = differential(90.0, 70.5, 130.0, &settings()).unwrap();
        assert!((d - (19.5 * 113.0 / 130.0)).abs() < 1e-12);
    }

    #[test]
    fn test_differential_is_linear_in_gross() {
        for slope in [55.0, 113.0, 131.0, 155.0] {
            for gross in [70.0, 85.0, 104.0] {
                let a = differential(gross, 71.3, slope, &settings()).unwrap();
                let b = differential(gross + 1.0, 71.3, slope, &settings()).unwrap();
                assert!(((b - a) - 113.0 / slope).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_differential_rejects_bad_inputs() {
        assert_eq!(differential(85.0, 72.0, 0.0, &settings()), None);
        assert_eq!(differential(85.0, 72.0, -113.0, &settings()), None);
        assert_eq!(differential(f64::NAN, 72.0, 113.0, &settings()), None);
        assert_eq!(differential(85.0, f64::INFINITY, 113.0, &settings()), None);
        assert_eq!(differential(85.0, 72.0, f64::NAN, &settings()), None);
    }

    #[test]
    fn test_round_differential_uses_requested_tee() {
        let course = CourseRatings {
            id: 1,
            name: "Lakeside".to_string(),
            tees: BTreeMap::from([
                ("regular".to_string(), TeeRating::new(72.0, 113.0)),
                ("red".to_string(), TeeRating::new(70.0, 113.0)),
            ]),
        };
        let round = Round {
            id: 7,
            player_id: 1,
            event_id: 1,
            event_name: "Spring Cup".to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            sequence: 7,
            out_score: Some(42),
            in_score: Some(43),
            total_score: None,
            course: Some(course),
        };

        assert_eq!(round_differential(&round, "regular", &settings()), Some(13.0));
        assert_eq!(round_differential(&round, "red", &settings()), Some(15.0));
        assert_eq!(round_differential(&round, "gold", &settings()), None);
    }
}
