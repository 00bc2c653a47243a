use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDate;

use super::connection::{DbPool, get_connection};
use super::{events, players, scores};
use crate::domain::{Event, LeagueSource, Participant, Player};
use crate::handicap::{EventId, PlayerId, Round};

/// `LeagueSource` backed by the SQLite database.
#[derive(Clone)]
pub struct SqliteLeague {
    pool: DbPool,
}

impl SqliteLeague {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl LeagueSource for SqliteLeague {
    fn player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        let mut conn = get_connection(&self.pool)?;
        players::find_by_id(&mut conn, player_id)
    }

    fn players(&self) -> Result<Vec<Player>> {
        let mut conn = get_connection(&self.pool)?;
        players::list_all(&mut conn)
    }

    fn event(&self, event_id: EventId) -> Result<Option<Event>> {
        let mut conn = get_connection(&self.pool)?;
        events::find_by_id(&mut conn, event_id)
    }

    fn events(&self) -> Result<Vec<Event>> {
        let mut conn = get_connection(&self.pool)?;
        events::list_recent_first(&mut conn)
    }

    fn rounds_for_player(&self, player_id: PlayerId) -> Result<Vec<Round>> {
        let mut conn = get_connection(&self.pool)?;
        scores::rounds_for_player(&mut conn, player_id)
    }

    fn rounds_before_date(&self, player_id: PlayerId, date: NaiveDate) -> Result<Vec<Round>> {
        let mut conn = get_connection(&self.pool)?;
        scores::rounds_before_date(&mut conn, player_id, date)
    }

    fn event_participants(&self, event_id: EventId) -> Result<Vec<Participant>> {
        let mut conn = get_connection(&self.pool)?;
        let rounds = scores::rounds_for_event(&mut conn, event_id)?;

        let mut known: HashMap<PlayerId, Player> = HashMap::new();
        let mut participants = Vec::with_capacity(rounds.len());
        for round in rounds {
            let player = match known.get(&round.player_id) {
                Some(player) => player.clone(),
                None => {
                    let player = players::find_by_id(&mut conn, round.player_id)?
                        .unwrap_or_else(|| Player::unknown(round.player_id));
                    known.insert(round.player_id, player.clone());
                    player
                }
            };
            participants.push(Participant { player, round });
        }
        Ok(participants)
    }
}
