use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::models::{Event, Participant, Player, ScoreRecord};
use super::source::LeagueSource;
use crate::handicap::{CourseRatings, EventId, PlayerId, Round, RoundId};

/// A whole league held in memory; also the JSON import format.
///
/// `scores` are kept in insertion order, which becomes each round's `sequence`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueSnapshot {
    pub players: Vec<Player>,
    pub courses: Vec<CourseRatings>,
    pub events: Vec<Event>,
    pub scores: Vec<ScoreRecord>,
}

impl LeagueSnapshot {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
        info!(
            "Loaded snapshot: {} players, {} courses, {} events, {} scores",
            snapshot.players.len(),
            snapshot.courses.len(),
            snapshot.events.len(),
            snapshot.scores.len()
        );
        Ok(snapshot)
    }

    /// Appends a new score.
    pub fn record_score(&mut self, score: ScoreRecord) -> Result<()> {
        if self.scores.iter().any(|s| s.id == score.id) {
            bail!("Score {} already recorded", score.id);
        }
        self.bump_revision(score.player_id);
        self.scores.push(score);
        Ok(())
    }

    /// Replaces the entered values of an existing score.
    pub fn correct_score(
        &mut self,
        score_id: RoundId,
        out_score: Option<i32>,
        in_score: Option<i32>,
        total_score: Option<i32>,
    ) -> Result<()> {
        let Some(score) = self.scores.iter_mut().find(|s| s.id == score_id) else {
            bail!("Score {} not found", score_id);
        };
        score.out_score = out_score;
        score.in_score = in_score;
        score.total_score = total_score;
        let player_id = score.player_id;
        self.bump_revision(player_id);
        Ok(())
    }

    /// Inserts or replaces a course; every player with a round there gets a new revision.
    pub fn upsert_course(&mut self, course: CourseRatings) {
        let course_id = course.id;
        match self.courses.iter_mut().find(|c| c.id == course_id) {
            Some(existing) => *existing = course,
            None => self.courses.push(course),
        }

        let affected: Vec<PlayerId> = self
            .scores
            .iter()
            .filter(|s| self.event_by_id(s.event_id).and_then(|e| e.course_id) == Some(course_id))
            .map(|s| s.player_id)
            .collect();
        for player_id in affected {
            self.bump_revision(player_id);
        }
    }

    pub fn set_category(&mut self, player_id: PlayerId, category: Option<String>) -> Result<()> {
        let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) else {
            bail!("Player {} not found", player_id);
        };
        player.category = category;
        player.revision += 1;
        Ok(())
    }

    fn bump_revision(&mut self, player_id: PlayerId) {
        if let Some(player) = self.players.iter_mut().find(|p| p.id == player_id) {
            player.revision += 1;
        }
    }

    fn event_by_id(&self, event_id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    fn build_round(&self, sequence: usize, score: &ScoreRecord) -> Option<Round> {
        let Some(event) = self.event_by_id(score.event_id) else {
            debug!("Score {} references missing event {}", score.id, score.event_id);
            return None;
        };
        let course = event
            .course_id
            .and_then(|id| self.courses.iter().find(|c| c.id == id))
            .cloned();

        Some(Round {
            id: score.id,
            player_id: score.player_id,
            event_id: event.id,
            event_name: event.name.clone(),
            event_date: event.event_date,
            sequence: sequence as i64,
            out_score: score.out_score,
            in_score: score.in_score,
            total_score: score.total_score,
            course,
        })
    }

    fn rounds_where(&self, keep: impl Fn(&ScoreRecord) -> bool) -> Vec<Round> {
        self.scores
            .iter()
            .enumerate()
            .filter(|(_, s)| keep(s))
            .filter_map(|(seq, s)| self.build_round(seq, s))
            .collect()
    }
}

impl LeagueSource for LeagueSnapshot {
    fn player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        Ok(self.players.iter().find(|p| p.id == player_id).cloned())
    }

    fn players(&self) -> Result<Vec<Player>> {
        let mut players = self.players.clone();
        players.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(players)
    }

    fn event(&self, event_id: EventId) -> Result<Option<Event>> {
        Ok(self.event_by_id(event_id).cloned())
    }

    fn events(&self) -> Result<Vec<Event>> {
        let mut events = self.events.clone();
        events.sort_by(|a, b| b.event_date.cmp(&a.event_date).then(b.id.cmp(&a.id)));
        Ok(events)
    }

    fn rounds_for_player(&self, player_id: PlayerId) -> Result<Vec<Round>> {
        Ok(self.rounds_where(|s| s.player_id == player_id))
    }

    fn rounds_before_date(&self, player_id: PlayerId, date: NaiveDate) -> Result<Vec<Round>> {
        let mut rounds = self.rounds_for_player(player_id)?;
        rounds.retain(|r| r.event_date < date);
        Ok(rounds)
    }

    fn event_participants(&self, event_id: EventId) -> Result<Vec<Participant>> {
        let participants = self
            .rounds_where(|s| s.event_id == event_id)
            .into_iter()
            .map(|round| {
                let player = self
                    .players
                    .iter()
                    .find(|p| p.id == round.player_id)
                    .cloned()
                    .unwrap_or_else(|| Player::unknown(round.player_id));
                Participant { player, round }
            })
            .collect();
        Ok(participants)
    }
}
