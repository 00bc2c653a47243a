use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::{AppConfig, EntrySettings};
use crate::database::{self, DbConn, courses, events, players, scores};
use crate::domain::{LeagueSnapshot, ScoreRecord};

/// Rebuilds the SQLite database from a JSON league snapshot.
pub struct LoadService {
    config: AppConfig,
}

impl LoadService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, snapshot_path: &Path, db_path: &str) -> Result<()> {
        let temp_db_path = format!("{}.tmp", db_path);

        info!("=== Loading League Snapshot (Atomic) ===\n");
        info!("Target DB: {}, Temp DB: {}", db_path, temp_db_path);

        let snapshot = LeagueSnapshot::from_file(snapshot_path)?;

        if Path::new(&temp_db_path).exists() {
            std::fs::remove_file(&temp_db_path)
                .with_context(|| format!("Failed to remove stale {temp_db_path}"))?;
        }

        self.load_into(&temp_db_path, &snapshot)?;

        std::fs::rename(&temp_db_path, db_path)
            .with_context(|| format!("Failed to move {temp_db_path} to {db_path}"))?;
        info!("Successfully swapped database to {}", db_path);

        info!("=== Load Complete ===");
        Ok(())
    }

    fn load_into(&self, db_path: &str, snapshot: &LeagueSnapshot) -> Result<()> {
        let pool = database::create_pool(db_path)?;
        let mut conn = database::get_connection(&pool)?;
        import_snapshot(&mut conn, snapshot, &self.config.entry)
    }
}

/// Resets the schema and writes every record of `snapshot` in one transaction.
pub fn import_snapshot(conn: &mut DbConn, snapshot: &LeagueSnapshot, entry: &EntrySettings) -> Result<()> {
    database::setup::reset_database(conn)?;
    info!("  → Database schema reset\n");

    conn.execute_batch("BEGIN")
        .context("Failed to start import transaction")?;
    let outcome = write_records(conn, snapshot, entry);
    match outcome {
        Ok(()) => conn.execute_batch("COMMIT").context("Failed to commit import")?,
        Err(e) => {
            conn.execute_batch("ROLLBACK")
                .context("Failed to roll back import")?;
            return Err(e);
        }
    }

    info!(
        "  → Imported {} players, {} courses, {} events, {} scores\n",
        snapshot.players.len(),
        snapshot.courses.len(),
        snapshot.events.len(),
        snapshot.scores.len()
    );
    Ok(())
}

fn write_records(conn: &mut DbConn, snapshot: &LeagueSnapshot, entry: &EntrySettings) -> Result<()> {
    for player in &snapshot.players {
        players::insert_player(conn, player.id, &player.name, player.category.as_deref())?;
    }
    for course in &snapshot.courses {
        courses::insert_course(conn, course)?;
    }
    for event in &snapshot.events {
        events::insert_event(conn, event)?;
    }

    let mut flagged = 0;
    for score in &snapshot.scores {
        if warn_implausible_halves(score, entry) {
            flagged += 1;
        }
        scores::insert_score(conn, score)?;
    }
    if flagged > 0 {
        warn!("  {} scores have halves outside the plausible range", flagged);
    }
    Ok(())
}

/// Logs, but keeps, halves outside the entry band.
fn warn_implausible_halves(score: &ScoreRecord, entry: &EntrySettings) -> bool {
    let mut flagged = false;
    for (label, half) in [("OUT", score.out_score), ("IN", score.in_score)] {
        if let Some(value) = half.filter(|v| !entry.is_plausible_half(*v)) {
            warn!(
                "Score {} (player {}, event {}): {} = {} looks implausible",
                score.id, score.player_id, score.event_id, label, value
            );
            flagged = true;
        }
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{SqliteLeague, create_memory_pool, get_connection};
    use crate::domain::LeagueSource;

    const SNAPSHOT: &str = r#"{
        "players": [{"id": 1, "name": "Sato", "category": "M"}],
        "courses": [{"id": 10, "name": "Lakeside", "tees": {"regular": {"course_rating": 72.0, "slope": 113.0}}}],
        "events": [
            {"id": 100, "name": "Spring Cup", "event_date": "2024-04-01", "course_id": 10},
            {"id": 101, "name": "Summer Cup", "event_date": "2024-07-01", "course_id": 10}
        ],
        "scores": [
            {"id": 1, "player_id": 1, "event_id": 100, "out_score": 41, "in_score": 43, "total_score": 84},
            {"id": 2, "player_id": 1, "event_id": 101, "out_score": 12, "in_score": 90}
        ]
    }"#;

    #[test]
    fn test_import_snapshot_round_trips_through_sqlite() {
        let snapshot: LeagueSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        import_snapshot(&mut conn, &snapshot, &EntrySettings::default()).unwrap();
        drop(conn);

        let league = SqliteLeague::new(pool);
        let expected: Vec<_> = snapshot
            .rounds_for_player(1)
            .unwrap()
            .into_iter()
            .map(|mut r| {
                // SQLite orders same-day rounds by score id.
                r.sequence = r.id;
                r
            })
            .collect();
        assert_eq!(league.rounds_for_player(1).unwrap(), expected);
        assert_eq!(league.player(1).unwrap().unwrap().revision, 2);
    }

    #[test]
    fn test_failed_import_rolls_back() {
        let mut snapshot: LeagueSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        snapshot.players.push(snapshot.players[0].clone());

        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        assert!(import_snapshot(&mut conn, &snapshot, &EntrySettings::default()).is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM players", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_implausible_halves_are_flagged_not_rejected() {
        let snapshot: LeagueSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let entry = EntrySettings::default();
        assert!(!warn_implausible_halves(&snapshot.scores[0], &entry));
        assert!(warn_implausible_halves(&snapshot.scores[1], &entry));
    }

    #[test]
    fn test_run_swaps_database_file() {
        let dir = std::env::temp_dir().join("fairway_handicap_load_test");
        std::fs::create_dir_all(&dir).unwrap();
        let snapshot_path = dir.join("league.json");
        std::fs::write(&snapshot_path, SNAPSHOT).unwrap();
        let db_path = dir.join("league.db");
        let db_path = db_path.to_string_lossy().to_string();

        LoadService::new(AppConfig::default()).run(&snapshot_path, &db_path).unwrap();

        assert!(Path::new(&db_path).exists());
        assert!(!Path::new(&format!("{db_path}.tmp")).exists());
        let league = SqliteLeague::new(database::create_pool(&db_path).unwrap());
        assert_eq!(league.events().unwrap().len(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
