use anyhow::{Context, Result};

use super::connection::DbConn;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Drops and recreates every table and trigger.
pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    // Trigger bodies contain ';', so the script runs as one batch.
    conn.execute_batch(SCHEMA_SQL)
        .context("Failed to apply database schema")?;

    log::info!("Database schema reset successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_memory_pool, get_connection};

    #[test]
    fn test_reset_is_repeatable() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();

        reset_database(&mut conn).unwrap();
        conn.execute("INSERT INTO players (id, name) VALUES (1, 'Sato')", []).unwrap();
        reset_database(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM players", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
