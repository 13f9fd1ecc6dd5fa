use rusqlite::{Connection, Result};

/// Initialise catalog tables. Safe to call on every startup (idempotent).
pub fn init_db(conn: &Connection) -> Result<()> {
    create_course_table(conn)?;
    create_exam_table(conn)?;
    Ok(())
}

/// COLLATE NOCASE on `code` makes course lookup case-insensitive and
/// rejects duplicate codes that differ only in casing.
fn create_course_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS course (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            code  TEXT NOT NULL UNIQUE COLLATE NOCASE,
            title TEXT NOT NULL
        );",
    )
}

/// Timestamps are stored as RFC 3339 TEXT in UTC.
/// idx_exam_course speeds up the hot path: exams_by_course().
fn create_exam_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS exam (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            course_id   INTEGER NOT NULL REFERENCES course(id),
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_exam_course
            ON exam(course_id);",
    )
}
