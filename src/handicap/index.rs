use super::types::IndexValue;
use crate::config::HandicapSettings;

/// Reduces differentials (oldest first) to a handicap index.
///
/// Best `best_of` of the last `window` finite values are averaged, rounded to
/// one decimal and clamped to `[min_index, max_index]`. An empty history yields
/// `max_index`.
pub fn handicap_index(differentials: &[f64], settings: &HandicapSettings) -> IndexValue {
    let cleaned: Vec<f64> = differentials.iter().copied().filter(|d| d.is_finite()).collect();
    let recent = tail(&cleaned, settings.history_cap);
    if recent.is_empty() {
        return settings.max_index;
    }

    let mut window = tail(recent, settings.window).to_vec();
    if window.is_empty() {
        return settings.max_index;
    }
    window.sort_by(f64::total_cmp);

    let take = settings.best_of.clamp(1, window.len());
    let average = window[..take].iter().sum::<f64>() / take as f64;

    clamp_index(round_to_tenth(average), settings)
}

fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

fn clamp_index(value: f64, settings: &HandicapSettings) -> IndexValue {
    // no panic on inverted bounds
    let clamped = value.max(settings.min_index).min(settings.max_index);
    // -0.0 normalises to 0.0
    clamped + 0.0
}

/// Rounds half-up (towards +inf) to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(diffs: &[f64]) -> f64 {
        handicap_index(diffs, &HandicapSettings::default())
    }

    fn has_one_decimal(value: f64) -> bool {
        ((value * 10.0).round() - value * 10.0).abs() < 1e-9
    }

    #[test]
    fn test_empty_history_is_max_index() {
        assert_eq!(index(&[]), 48.0);
        assert_eq!(index(&[f64::NAN, f64::INFINITY]), 48.0);
    }

    #[test]
    fn test_best_two_of_last_five() {
        assert_eq!(index(&[10.0, 12.0, 8.0, 15.0, 9.0]), 8.5);
    }

    #[test]
    fn test_single_round_is_its_rounded_differential() {
        assert_eq!(index(&[13.04]), 13.0);
        assert_eq!(index(&[13.05]), 13.1);
        assert_eq!(index(&[-3.2]), 0.0);
        assert_eq!(index(&[61.7]), 48.0);
    }

    #[test]
    fn test_short_history_averages_best_two() {
        assert_eq!(index(&[20.0, 10.0]), 15.0);
        assert_eq!(index(&[20.0, 10.0, 11.0]), 10.5);
    }

    #[test]
    fn test_only_last_five_matter() {
        let recent = [14.0, 9.6, 22.1, 11.2, 17.8];
        let expected = index(&recent);

        let mut longer = vec![0.0, 1.0, 2.0, 3.0];
        longer.extend_from_slice(&recent);
        assert_eq!(index(&longer), expected);
        assert_eq!(expected, 10.4);
    }

    #[test]
    fn test_non_finite_entries_are_dropped() {
        assert_eq!(index(&[10.0, f64::NAN, 12.0, 8.0, 15.0, f64::NEG_INFINITY, 9.0]), 8.5);
    }

    #[test]
    fn test_history_cap_keeps_most_recent() {
        let settings = HandicapSettings {
            history_cap: 3,
            window: 10,
            ..HandicapSettings::default()
        };
        // Oldest two values fall outside the cap.
        assert_eq!(handicap_index(&[1.0, 2.0, 30.0, 20.0, 10.0], &settings), 15.0);
    }

    #[test]
    fn test_degenerate_settings_do_not_panic() {
        let zero_window = HandicapSettings {
            window: 0,
            ..HandicapSettings::default()
        };
        assert_eq!(handicap_index(&[10.0, 12.0], &zero_window), 48.0);

        let zero_best_of = HandicapSettings {
            best_of: 0,
            ..HandicapSettings::default()
        };
        assert_eq!(handicap_index(&[10.0, 12.0], &zero_best_of), 10.0);

        let inverted = HandicapSettings {
            min_index: 10.0,
            max_index: 5.0,
            ..HandicapSettings::default()
        };
        assert_eq!(handicap_index(&[20.0], &inverted), 5.0);
    }

    #[test]
    fn test_output_bounds_and_precision() {
        let samples = [
            vec![-40.0, -2.0],
            vec![3.333, 7.777, 1.111],
            vec![47.96, 48.04],
            vec![99.0, 120.5, 77.7, 64.2, 88.8],
            vec![0.04],
            vec![12.345, 6.789, 10.101, 8.888, 9.999, 5.555],
        ];
        for diffs in samples {
            let value = index(&diffs);
            assert!((0.0..=48.0).contains(&value), "{value} out of range");
            assert!(has_one_decimal(value), "{value} has more than one decimal");
            assert!(value.is_sign_positive());
        }
    }

    #[test]
    fn test_round_to_tenth_half_up() {
        assert_eq!(round_to_tenth(76.5), 76.5);
        assert_eq!(round_to_tenth(8.25), 8.3);
        assert_eq!(round_to_tenth(-0.25), -0.2);
    }
}
