use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use super::courses;
use crate::domain::ScoreRecord;
use crate::handicap::{CourseId, CourseRatings, EventId, PlayerId, Round, RoundId};

pub fn insert_score(conn: &mut DbConn, score: &ScoreRecord) -> Result<()> {
    let sql = "INSERT INTO scores (id, player_id, event_id, out_score, in_score, total_score) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

    conn.execute(
        sql,
        params![
            score.id,
            score.player_id,
            score.event_id,
            score.out_score,
            score.in_score,
            score.total_score
        ],
    )
    .with_context(|| format!("Failed to insert score {}", score.id))?;
    Ok(())
}

/// Rewrites the entered values of a score; returns its player, `None` for an unknown id.
pub fn correct_score(
    conn: &mut DbConn,
    id: RoundId,
    out_score: Option<i32>,
    in_score: Option<i32>,
    total_score: Option<i32>,
) -> Result<Option<PlayerId>> {
    conn.query_row(
        "UPDATE scores SET out_score = ?1, in_score = ?2, total_score = ?3 WHERE id = ?4 RETURNING player_id",
        params![out_score, in_score, total_score, id],
        |row| row.get(0),
    )
    .optional()
    .with_context(|| format!("Failed to correct score {id}"))
}

/// Score joined with its event, before the course is attached.
struct RoundRow {
    id: RoundId,
    player_id: PlayerId,
    event_id: EventId,
    event_name: String,
    event_date: NaiveDate,
    out_score: Option<i32>,
    in_score: Option<i32>,
    total_score: Option<i32>,
    course_id: Option<CourseId>,
}

const ROUND_SELECT: &str = "
    SELECT s.id, s.player_id, s.event_id, e.name, e.event_date,
           s.out_score, s.in_score, s.total_score, e.course_id
    FROM scores s
    JOIN events e ON e.id = s.event_id
";

fn parse_round_row(row: &rusqlite::Row) -> rusqlite::Result<RoundRow> {
    Ok(RoundRow {
        id: row.get(0)?,
        player_id: row.get(1)?,
        event_id: row.get(2)?,
        event_name: row.get(3)?,
        event_date: row.get(4)?,
        out_score: row.get(5)?,
        in_score: row.get(6)?,
        total_score: row.get(7)?,
        course_id: row.get(8)?,
    })
}

fn query_rounds(
    conn: &mut DbConn,
    filter: &str,
    args: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Round>> {
    let sql = format!("{ROUND_SELECT} WHERE {filter} ORDER BY e.event_date ASC, s.id ASC");

    let rows = {
        let mut stmt = conn.prepare(&sql)?;
        stmt.query_map(args, parse_round_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to query rounds")?
    };

    attach_courses(conn, rows)
}

fn attach_courses(conn: &mut DbConn, rows: Vec<RoundRow>) -> Result<Vec<Round>> {
    let mut course_cache: HashMap<CourseId, Option<CourseRatings>> = HashMap::new();
    let mut rounds = Vec::with_capacity(rows.len());

    for row in rows {
        let course = match row.course_id {
            Some(course_id) => {
                if !course_cache.contains_key(&course_id) {
                    let loaded = courses::find_by_id(conn, course_id)?;
                    course_cache.insert(course_id, loaded);
                }
                course_cache.get(&course_id).cloned().flatten()
            }
            None => None,
        };

        rounds.push(Round {
            id: row.id,
            player_id: row.player_id,
            event_id: row.event_id,
            event_name: row.event_name,
            event_date: row.event_date,
            sequence: row.id,
            out_score: row.out_score,
            in_score: row.in_score,
            total_score: row.total_score,
            course,
        });
    }

    Ok(rounds)
}

pub fn rounds_for_player(conn: &mut DbConn, player_id: PlayerId) -> Result<Vec<Round>> {
    query_rounds(conn, "s.player_id = ?1", params![player_id])
}

pub fn rounds_before_date(
    conn: &mut DbConn,
    player_id: PlayerId,
    date: NaiveDate,
) -> Result<Vec<Round>> {
    query_rounds(conn, "s.player_id = ?1 AND e.event_date < ?2", params![player_id, date])
}

pub fn rounds_for_event(conn: &mut DbConn, event_id: EventId) -> Result<Vec<Round>> {
    query_rounds(conn, "s.event_id = ?1", params![event_id])
}
