use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::Event;
use crate::handicap::EventId;

const EVENT_COLUMNS: &str = "id, name, event_date, course_id";

pub fn insert_event(conn: &mut DbConn, event: &Event) -> Result<Event> {
    let sql = format!(
        "INSERT INTO events (id, name, event_date, course_id) VALUES (?1, ?2, ?3, ?4) RETURNING {EVENT_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![event.id, event.name, event.event_date, event.course_id],
        parse_event_row,
    )
    .with_context(|| format!("Failed to insert event {}", event.id))
}

fn parse_event_row(row: &rusqlite::Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        name: row.get(1)?,
        event_date: row.get(2)?,
        course_id: row.get(3)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: EventId) -> Result<Option<Event>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_event_row)
        .optional()
        .context("Failed to query event by id")
}

pub fn list_recent_first(conn: &mut DbConn) -> Result<Vec<Event>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY event_date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_event_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
