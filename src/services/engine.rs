use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::cache::{IndexMemo, MemoKey};
use crate::config::AppConfig;
use crate::database::{self, SqliteLeague, scores};
use crate::domain::{Event, LeagueSource, Player};
use crate::handicap::{
    self, EventId, IndexValue, PlayerId, RankMode, RankedResult, RoundId, ScoreCard, TrendPoint,
};

pub struct PlayerProfile {
    pub player: Player,
    pub tee: String,
    pub current_index: IndexValue,
    pub trend: Vec<TrendPoint>,
}

pub struct EventResults {
    pub event: Event,
    pub mode: RankMode,
    pub results: Vec<RankedResult>,
}

/// Handicap queries over a league source, with the optional index memo in front.
///
/// Every query re-reads the source; only settled indexes are memoised, keyed by
/// the player's revision so edited history is never served stale.
pub struct HandicapService<S> {
    source: S,
    config: AppConfig,
    memo: IndexMemo,
}

impl<S: LeagueSource> HandicapService<S> {
    pub fn new(source: S, config: AppConfig) -> Self {
        let memo = IndexMemo::new(config.memo.capacity);
        Self { source, config, memo }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn tee_for(&self, player: &Player) -> &str {
        self.config.tees.tee_for(player.category.as_deref())
    }

    /// Index from rounds before `cutoff` (all rounds when `None`); `None` without history.
    fn settled_index(&self, player: &Player, cutoff: Option<NaiveDate>) -> Result<Option<IndexValue>> {
        let tee = self.tee_for(player);
        let compute = || -> Result<Option<IndexValue>> {
            let rounds = match cutoff {
                Some(date) => self.source.rounds_before_date(player.id, date)?,
                None => self.source.rounds_for_player(player.id)?,
            };
            debug!(
                "Computing index for player {} from {} rounds (cutoff {:?}, tee {})",
                player.id,
                rounds.len(),
                cutoff,
                tee
            );
            Ok(handicap::settled_index(player.id, &rounds, tee, cutoff, &self.config.handicap))
        };

        if !self.config.memo.enabled {
            return compute();
        }

        let key = MemoKey {
            player_id: player.id,
            cutoff,
            revision: player.revision,
            tee: tee.to_string(),
            formula_version: self.config.handicap.formula_version.clone(),
        };
        self.memo.get_or_try_insert(key, compute)
    }

    /// Every player with their live index, ordered by name.
    pub fn roster(&self) -> Result<Vec<(Player, IndexValue)>> {
        self.source
            .players()?
            .into_iter()
            .map(|player| {
                let index = self
                    .settled_index(&player, None)?
                    .unwrap_or(self.config.handicap.max_index);
                Ok((player, index))
            })
            .collect()
    }

    /// Live index over the whole history; `None` for an unknown player.
    pub fn current_index(&self, player_id: PlayerId) -> Result<Option<IndexValue>> {
        let Some(player) = self.source.player(player_id)? else {
            return Ok(None);
        };
        let settled = self.settled_index(&player, None)?;
        Ok(Some(settled.unwrap_or(self.config.handicap.max_index)))
    }

    /// Index that applied on `date`, from rounds strictly before it.
    pub fn index_as_of(&self, player_id: PlayerId, date: NaiveDate) -> Result<Option<IndexValue>> {
        let Some(player) = self.source.player(player_id)? else {
            return Ok(None);
        };
        let settled = self.settled_index(&player, Some(date))?;
        Ok(Some(settled.unwrap_or(self.config.handicap.max_index)))
    }

    pub fn trend(&self, player_id: PlayerId) -> Result<Option<Vec<TrendPoint>>> {
        let Some(player) = self.source.player(player_id)? else {
            return Ok(None);
        };
        Ok(Some(self.trend_for(&player)?))
    }

    fn trend_for(&self, player: &Player) -> Result<Vec<TrendPoint>> {
        let rounds = self.source.rounds_for_player(player.id)?;
        Ok(handicap::reconstruct(
            player.id,
            &rounds,
            self.tee_for(player),
            &self.config.handicap,
        ))
    }

    pub fn player_profile(&self, player_id: PlayerId) -> Result<Option<PlayerProfile>> {
        let Some(player) = self.source.player(player_id)? else {
            return Ok(None);
        };
        let trend = self.trend_for(&player)?;
        let current_index = self
            .settled_index(&player, None)?
            .unwrap_or(self.config.handicap.max_index);

        Ok(Some(PlayerProfile {
            tee: self.tee_for(&player).to_string(),
            player,
            current_index,
            trend,
        }))
    }

    /// Ranked field of an event, each player handicapped as of the event date.
    pub fn tournament_results(&self, event_id: EventId, mode: RankMode) -> Result<Option<EventResults>> {
        let Some(event) = self.source.event(event_id)? else {
            return Ok(None);
        };
        let participants = self.source.event_participants(event_id)?;
        info!(
            "Ranking {} entries of event {} ({}) by {}",
            participants.len(),
            event.id,
            event.event_date,
            mode
        );

        let mut handicaps: HashMap<PlayerId, Option<IndexValue>> = HashMap::new();
        let mut cards = Vec::with_capacity(participants.len());
        for participant in participants {
            let handicap = match handicaps.get(&participant.player.id) {
                Some(known) => *known,
                None => {
                    let value = self.settled_index(&participant.player, Some(event.event_date))?;
                    handicaps.insert(participant.player.id, value);
                    value
                }
            };

            let gross = participant.round.gross();
            cards.push(ScoreCard {
                player_id: participant.player.id,
                name: participant.player.name,
                category: participant.player.category,
                handicap,
                out_score: participant.round.out_score,
                in_score: participant.round.in_score,
                gross,
                net: handicap::net_for(gross, handicap),
            });
        }

        Ok(Some(EventResults {
            event,
            mode,
            results: handicap::rank_results(cards, mode, &self.config.ranking.collation),
        }))
    }
}

impl HandicapService<SqliteLeague> {
    /// Rewrites an entered score and drops the owner's memo entries.
    ///
    /// Returns the owning player, or `None` when no such score exists.
    pub fn correct_score(
        &self,
        score_id: RoundId,
        out_score: Option<i32>,
        in_score: Option<i32>,
        total_score: Option<i32>,
    ) -> Result<Option<PlayerId>> {
        for half in [out_score, in_score].into_iter().flatten() {
            if !self.config.entry.is_plausible_half(half) {
                warn!("Score {}: half of {} is outside the plausible band", score_id, half);
            }
        }

        let mut conn = database::get_connection(self.source.pool())?;
        let Some(player_id) = scores::correct_score(&mut conn, score_id, out_score, in_score, total_score)?
        else {
            return Ok(None);
        };

        // The revision trigger already makes old entries miss; this frees them.
        self.memo.invalidate_player(player_id);
        info!("Corrected score {} of player {}", score_id, player_id);
        Ok(Some(player_id))
    }
}
