use chrono::NaiveDate;

use super::differential::round_differential;
use super::index::handicap_index;
use super::types::{IndexValue, PlayerId, Round, TrendPoint};
use crate::config::HandicapSettings;

/// The player's own rounds, oldest first; same-day rounds keep insertion order.
fn chronological(player_id: PlayerId, rounds: &[Round]) -> Vec<&Round> {
    let mut own: Vec<&Round> = rounds.iter().filter(|r| r.player_id == player_id).collect();
    own.sort_by_key(|r| (r.event_date, r.sequence));
    own
}

/// Walks the full history and records the index as it stood after each round.
///
/// Rounds without a usable differential still appear, with `differential` and
/// (until the first valid round) `index_after` set to `None`.
pub fn reconstruct(
    player_id: PlayerId,
    rounds: &[Round],
    tee: &str,
    settings: &HandicapSettings,
) -> Vec<TrendPoint> {
    let mut running: Vec<f64> = Vec::new();

    chronological(player_id, rounds)
        .into_iter()
        .map(|round| {
            let differential = round_differential(round, tee, settings);
            if let Some(d) = differential {
                running.push(d);
            }
            let index_after = (!running.is_empty()).then(|| handicap_index(&running, settings));

            TrendPoint {
                round_id: round.id,
                event_id: round.event_id,
                event_name: round.event_name.clone(),
                event_date: round.event_date,
                gross: round.gross(),
                differential,
                index_after,
            }
        })
        .collect()
}

/// Valid differentials of rounds played strictly before `cutoff` (all rounds when `None`).
fn qualifying_differentials(
    player_id: PlayerId,
    rounds: &[Round],
    tee: &str,
    cutoff: Option<NaiveDate>,
    settings: &HandicapSettings,
) -> Vec<f64> {
    chronological(player_id, rounds)
        .into_iter()
        .take_while(|r| cutoff.is_none_or(|c| r.event_date < c))
        .filter_map(|r| round_differential(r, tee, settings))
        .collect()
}

/// Index from rounds before `cutoff`, or `None` when no round qualifies.
pub fn settled_index(
    player_id: PlayerId,
    rounds: &[Round],
    tee: &str,
    cutoff: Option<NaiveDate>,
    settings: &HandicapSettings,
) -> Option<IndexValue> {
    let differentials = qualifying_differentials(player_id, rounds, tee, cutoff, settings);
    (!differentials.is_empty()).then(|| handicap_index(&differentials, settings))
}

/// Index that applied to an event held on `cutoff`.
pub fn index_as_of(
    player_id: PlayerId,
    rounds: &[Round],
    tee: &str,
    cutoff: NaiveDate,
    settings: &HandicapSettings,
) -> IndexValue {
    settled_index(player_id, rounds, tee, Some(cutoff), settings).unwrap_or(settings.max_index)
}

/// Live index over the whole history.
pub fn current_index(
    player_id: PlayerId,
    rounds: &[Round],
    tee: &str,
    settings: &HandicapSettings,
) -> IndexValue {
    settled_index(player_id, rounds, tee, None, settings).unwrap_or(settings.max_index)
}
