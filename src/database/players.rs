use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::Player;
use crate::handicap::PlayerId;

const PLAYER_COLUMNS: &str = "id, name, category, revision";

pub fn insert_player(
    conn: &mut DbConn,
    id: PlayerId,
    name: &str,
    category: Option<&str>,
) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (id, name, category) VALUES (?1, ?2, ?3) RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(&sql, params![id, name, category], parse_player_row)
        .with_context(|| format!("Failed to insert player {id}"))
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        revision: row.get(3)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: PlayerId) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY name ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
