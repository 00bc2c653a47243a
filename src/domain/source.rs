use anyhow::Result;
use chrono::NaiveDate;

use super::models::{Event, Participant, Player};
use crate::handicap::{EventId, PlayerId, Round};

/// Read access to league history. Implementations hand out materialised,
/// already-joined rounds; the engine never performs I/O itself.
pub trait LeagueSource {
    fn player(&self, player_id: PlayerId) -> Result<Option<Player>>;

    /// All players ordered by name.
    fn players(&self) -> Result<Vec<Player>>;

    fn event(&self, event_id: EventId) -> Result<Option<Event>>;

    /// All events, most recent first.
    fn events(&self) -> Result<Vec<Event>>;

    fn rounds_for_player(&self, player_id: PlayerId) -> Result<Vec<Round>>;

    /// Rounds of events held strictly before `date`.
    fn rounds_before_date(&self, player_id: PlayerId, date: NaiveDate) -> Result<Vec<Round>>;

    fn event_participants(&self, event_id: EventId) -> Result<Vec<Participant>>;
}
