use std::collections::BTreeMap;

use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::handicap::{CourseId, CourseRatings, TeeRating};

pub fn insert_course(conn: &mut DbConn, course: &CourseRatings) -> Result<()> {
    conn.execute(
        "INSERT INTO courses (id, name) VALUES (?1, ?2)",
        params![course.id, course.name],
    )
    .with_context(|| format!("Failed to insert course {}", course.id))?;

    for (tee, rating) in &course.tees {
        upsert_tee(conn, course.id, tee, rating)?;
    }
    Ok(())
}

pub fn upsert_tee(conn: &mut DbConn, course_id: CourseId, tee: &str, rating: &TeeRating) -> Result<()> {
    let sql = "INSERT INTO course_tees (course_id, tee, course_rating, slope) VALUES (?1, ?2, ?3, ?4) \
               ON CONFLICT (course_id, tee) DO UPDATE SET course_rating = excluded.course_rating, slope = excluded.slope";

    conn.execute(sql, params![course_id, tee, finite_or_null(rating.course_rating), finite_or_null(rating.slope)])
        .with_context(|| format!("Failed to store tee '{tee}' of course {course_id}"))?;
    Ok(())
}

/// SQLite has no NaN; unusable ratings are stored as NULL and skipped on read.
fn finite_or_null(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

pub fn find_by_id(conn: &mut DbConn, id: CourseId) -> Result<Option<CourseRatings>> {
    let name: Option<String> = conn
        .query_row("SELECT name FROM courses WHERE id = ?1", params![id], |row| row.get(0))
        .optional()
        .context("Failed to query course by id")?;

    let Some(name) = name else {
        return Ok(None);
    };

    Ok(Some(CourseRatings {
        id,
        name,
        tees: load_tees(conn, id)?,
    }))
}

fn load_tees(conn: &mut DbConn, course_id: CourseId) -> Result<BTreeMap<String, TeeRating>> {
    let sql = "SELECT tee, course_rating, slope FROM course_tees WHERE course_id = ?1";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![course_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, Option<f64>>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let tees = rows
        .into_iter()
        .filter_map(|(tee, course_rating, slope)| Some((tee, TeeRating::new(course_rating?, slope?))))
        .collect();
    Ok(tees)
}
