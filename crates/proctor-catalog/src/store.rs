use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::{debug, instrument};

use crate::error::{CatalogError, Result};
use crate::types::{Course, Exam};

/// Cached query results expire after 5 minutes.
const CACHE_TTL_SECS: i64 = 300;
/// Maximum cache entries before eviction.
const MAX_CACHE_ENTRIES: usize = 256;

/// Column order shared by every exam query in this crate.
const EXAM_SELECT_SQL: &str = "SELECT exam.id, exam.course_id, course.code,
            exam.start_time, exam.end_time
     FROM exam JOIN course ON course.id = exam.course_id";

/// Thread-safe store for courses and exams.
///
/// Wraps a single SQLite connection in a `Mutex`. For high-concurrency
/// deployments consider a connection pool (e.g. r2d2), but a Mutex is
/// sufficient for this read-mostly, single-node service.
///
/// Exam queries go through an in-process cache keyed by the verbatim
/// course-code string. Entries expire after [`CACHE_TTL_SECS`] and are
/// invalidated when an exam is inserted for the course; edits made to the
/// database out-of-band stay invisible until the TTL lapses.
pub struct CatalogStore {
    db: Mutex<Connection>,
    cache: Mutex<HashMap<String, CachedExams>>,
}

struct CachedExams {
    exams: Vec<Exam>,
    cached_at: i64,
}

impl CatalogStore {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// All exams for a course, matched by code (case-insensitive).
    ///
    /// A course with no exams — including a code no course has — yields an
    /// empty Vec, not an error. Results may be served from the cache.
    #[instrument(skip(self), fields(course_code))]
    pub fn exams_by_course(&self, course_code: &str) -> Result<Vec<Exam>> {
        validate_course_code(course_code)?;

        if let Some(exams) = self.cache_get(course_code) {
            debug!(course_code, count = exams.len(), "exam query cache hit");
            return Ok(exams);
        }

        let exams = {
            let db = self.db.lock().unwrap();
            let mut stmt = db.prepare(&format!(
                "{EXAM_SELECT_SQL} WHERE course.code = ?1 COLLATE NOCASE"
            ))?;
            let rows = stmt.query_map(rusqlite::params![course_code.trim()], row_to_exam)?;
            rows.collect::<rusqlite::Result<Vec<Exam>>>()?
        };

        self.cache_put(course_code.to_string(), exams.clone());
        Ok(exams)
    }

    /// Administrative insert of a new course.
    #[instrument(skip(self), fields(code))]
    pub fn insert_course(&self, code: &str, title: &str) -> Result<Course> {
        validate_course_code(code)?;
        let code = code.trim();
        let title = title.trim();

        let db = self.db.lock().unwrap();
        let inserted = db.execute(
            "INSERT INTO course (code, title) VALUES (?1, ?2)",
            rusqlite::params![code, title],
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(CatalogError::CourseExists {
                    code: code.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Course {
            id: db.last_insert_rowid(),
            code: code.to_string(),
            title: title.to_string(),
        })
    }

    /// Administrative insert of an exam sitting for an existing course.
    ///
    /// Enforces `start < end`; the referenced course must already exist.
    /// Invalidates cached query results for the course.
    #[instrument(skip(self), fields(course_code))]
    pub fn insert_exam(
        &self,
        course_code: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Exam> {
        if start >= end {
            return Err(CatalogError::InvalidExamWindow {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        let course = self
            .course_by_code(course_code)?
            .ok_or_else(|| CatalogError::CourseNotFound {
                code: course_code.trim().to_string(),
            })?;

        let id = {
            let db = self.db.lock().unwrap();
            db.execute(
                "INSERT INTO exam (course_id, start_time, end_time) VALUES (?1, ?2, ?3)",
                rusqlite::params![course.id, start.to_rfc3339(), end.to_rfc3339()],
            )?;
            db.last_insert_rowid()
        };

        self.invalidate_course(&course.code);

        Ok(Exam {
            id,
            course_id: course.id,
            course_code: course.code,
            start_time: start,
            end_time: end,
        })
    }

    /// Fetch a course by code (case-insensitive), `None` if absent.
    pub fn course_by_code(&self, code: &str) -> Result<Option<Course>> {
        validate_course_code(code)?;
        let db = self.db.lock().unwrap();
        match db.query_row(
            "SELECT id, code, title FROM course WHERE code = ?1 COLLATE NOCASE",
            rusqlite::params![code.trim()],
            row_to_course,
        ) {
            Ok(course) => Ok(Some(course)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CatalogError::Database(e)),
        }
    }

    // ── Cache plumbing ───────────────────────────────────────────────────────

    fn cache_get(&self, key: &str) -> Option<Vec<Exam>> {
        let now = Utc::now().timestamp();
        let mut cache = self.cache.lock().unwrap();
        if let Some(entry) = cache.get(key) {
            if now - entry.cached_at < CACHE_TTL_SECS {
                return Some(entry.exams.clone());
            }
        }
        // Absent or expired either way.
        cache.remove(key);
        None
    }

    fn cache_put(&self, key: String, exams: Vec<Exam>) {
        let now = Utc::now().timestamp();
        let mut cache = self.cache.lock().unwrap();
        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.retain(|_, v| now - v.cached_at < CACHE_TTL_SECS);
            if cache.len() >= MAX_CACHE_ENTRIES {
                // Still full of live entries: clearing is cheap to refill
                // for a read-mostly table.
                cache.clear();
            }
        }
        cache.insert(
            key,
            CachedExams {
                exams,
                cached_at: now,
            },
        );
    }

    /// Drop cached entries for a course, whatever casing the queries used.
    fn invalidate_course(&self, code: &str) {
        let mut cache = self.cache.lock().unwrap();
        cache.retain(|k, _| !k.trim().eq_ignore_ascii_case(code));
    }
}

/// Map a SELECT row (column order from EXAM_SELECT_SQL) to an Exam.
fn row_to_exam(row: &rusqlite::Row<'_>) -> rusqlite::Result<Exam> {
    Ok(Exam {
        id: row.get(0)?,
        course_id: row.get(1)?,
        course_code: row.get(2)?,
        start_time: parse_timestamp(3, row.get(3)?)?,
        end_time: parse_timestamp(4, row.get(4)?)?,
    })
}

fn row_to_course(row: &rusqlite::Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        code: row.get(1)?,
        title: row.get(2)?,
    })
}

fn parse_timestamp(idx: usize, value: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Course codes: non-empty after trim, at most 64 chars, ASCII letters,
/// digits, spaces, dashes and dots only.
fn validate_course_code(code: &str) -> Result<()> {
    let code = code.trim();
    if code.is_empty() {
        return Err(CatalogError::InvalidCourseCode {
            reason: "course code must not be empty".to_string(),
        });
    }
    if code.len() > 64 {
        return Err(CatalogError::InvalidCourseCode {
            reason: format!("course code is too long ({} chars, max 64)", code.len()),
        });
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '.'))
    {
        return Err(CatalogError::InvalidCourseCode {
            reason: format!("course code contains unsupported characters: {code:?}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store() -> CatalogStore {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        crate::db::init_db(&conn).expect("init schema");
        CatalogStore::new(conn)
    }

    fn window(day: u32, hour: u32) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = Utc.with_ymd_and_hms(2025, 5, day, hour, 0, 0).unwrap();
        (start, start + chrono::Duration::hours(2))
    }

    #[test]
    fn insert_course_and_read_back() {
        let store = store();
        let course = store.insert_course("CMSC 23200", "Introduction to Computer Security").unwrap();
        assert!(course.id > 0);

        let found = store.course_by_code("CMSC 23200").unwrap().unwrap();
        assert_eq!(found, course);
    }

    #[test]
    fn duplicate_course_code_is_rejected_even_with_different_casing() {
        let store = store();
        store.insert_course("CMSC 23200", "Security").unwrap();
        let err = store.insert_course("cmsc 23200", "Security again").unwrap_err();
        assert!(matches!(err, CatalogError::CourseExists { .. }));
    }

    #[test]
    fn empty_and_malformed_codes_are_rejected() {
        let store = store();
        assert!(matches!(
            store.exams_by_course("   ").unwrap_err(),
            CatalogError::InvalidCourseCode { .. }
        ));
        assert!(matches!(
            store.insert_course("CMSC\n23200", "Bad").unwrap_err(),
            CatalogError::InvalidCourseCode { .. }
        ));
        let long = "X".repeat(65);
        assert!(matches!(
            store.course_by_code(&long).unwrap_err(),
            CatalogError::InvalidCourseCode { .. }
        ));
    }

    #[test]
    fn exam_for_unknown_course_is_an_error() {
        let store = store();
        let (start, end) = window(28, 10);
        let err = store.insert_exam("CMSC 23200", start, end).unwrap_err();
        assert!(matches!(err, CatalogError::CourseNotFound { .. }));
    }

    #[test]
    fn exam_window_must_start_before_end() {
        let store = store();
        store.insert_course("CMSC 23200", "Security").unwrap();
        let (start, end) = window(28, 10);
        let err = store.insert_exam("CMSC 23200", end, start).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidExamWindow { .. }));
        // Zero-length windows are rejected too.
        let err = store.insert_exam("CMSC 23200", start, start).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidExamWindow { .. }));
    }

    #[test]
    fn course_with_no_exams_yields_empty_vec() {
        let store = store();
        store.insert_course("CMSC 23200", "Security").unwrap();
        assert!(store.exams_by_course("CMSC 23200").unwrap().is_empty());
        // Same for a code no course has.
        assert!(store.exams_by_course("MATH 99999").unwrap().is_empty());
    }

    #[test]
    fn all_exams_for_a_course_come_back_with_its_code() {
        let store = store();
        store.insert_course("CMSC 23200", "Security").unwrap();
        store.insert_course("MATH 15300", "Calculus").unwrap();
        let (s1, e1) = window(28, 10);
        let (s2, e2) = window(30, 14);
        let (s3, e3) = window(27, 8);
        store.insert_exam("CMSC 23200", s1, e1).unwrap();
        store.insert_exam("CMSC 23200", s2, e2).unwrap();
        store.insert_exam("MATH 15300", s3, e3).unwrap();

        let exams = store.exams_by_course("CMSC 23200").unwrap();
        assert_eq!(exams.len(), 2);
        assert!(exams.iter().all(|e| e.course_code == "CMSC 23200"));
    }

    #[test]
    fn course_code_match_is_case_insensitive() {
        let store = store();
        store.insert_course("CMSC 23200", "Security").unwrap();
        let (start, end) = window(28, 10);
        store.insert_exam("cmsc 23200", start, end).unwrap();

        let exams = store.exams_by_course("Cmsc 23200").unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].start_time, start);
        assert_eq!(exams[0].end_time, end);
    }

    #[test]
    fn repeated_queries_are_served_from_cache() {
        let store = store();
        store.insert_course("CMSC 23200", "Security").unwrap();
        let (start, end) = window(28, 10);
        store.insert_exam("CMSC 23200", start, end).unwrap();

        assert_eq!(store.exams_by_course("CMSC 23200").unwrap().len(), 1);

        // Delete the row out-of-band: the cached result must survive.
        store
            .db
            .lock()
            .unwrap()
            .execute("DELETE FROM exam", [])
            .unwrap();
        assert_eq!(store.exams_by_course("CMSC 23200").unwrap().len(), 1);

        // Once invalidated, the next query sees the real (empty) table.
        store.invalidate_course("CMSC 23200");
        assert!(store.exams_by_course("CMSC 23200").unwrap().is_empty());
    }

    #[test]
    fn expired_cache_entries_are_refetched() {
        let store = store();
        store.insert_course("CMSC 23200", "Security").unwrap();
        let (start, end) = window(28, 10);
        store.insert_exam("CMSC 23200", start, end).unwrap();
        assert_eq!(store.exams_by_course("CMSC 23200").unwrap().len(), 1);

        store
            .db
            .lock()
            .unwrap()
            .execute("DELETE FROM exam", [])
            .unwrap();

        // Age the cached entry past the TTL.
        {
            let mut cache = store.cache.lock().unwrap();
            for entry in cache.values_mut() {
                entry.cached_at -= CACHE_TTL_SECS + 1;
            }
        }
        assert!(store.exams_by_course("CMSC 23200").unwrap().is_empty());
    }

    #[test]
    fn inserting_an_exam_invalidates_cached_queries_for_its_course() {
        let store = store();
        store.insert_course("CMSC 23200", "Security").unwrap();
        let (s1, e1) = window(28, 10);
        store.insert_exam("CMSC 23200", s1, e1).unwrap();

        // Prime the cache under two casings of the same code.
        assert_eq!(store.exams_by_course("CMSC 23200").unwrap().len(), 1);
        assert_eq!(store.exams_by_course("cmsc 23200").unwrap().len(), 1);

        let (s2, e2) = window(30, 14);
        store.insert_exam("CMSC 23200", s2, e2).unwrap();

        assert_eq!(store.exams_by_course("CMSC 23200").unwrap().len(), 2);
        assert_eq!(store.exams_by_course("cmsc 23200").unwrap().len(), 2);
    }

    #[test]
    fn timestamps_round_trip_through_storage() {
        let store = store();
        store.insert_course("PHYS 13200", "Waves and Optics").unwrap();
        let start = Utc.with_ymd_and_hms(2025, 5, 29, 16, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 5, 29, 18, 0, 0).unwrap();
        store.insert_exam("PHYS 13200", start, end).unwrap();
        store.invalidate_course("PHYS 13200");

        let exams = store.exams_by_course("PHYS 13200").unwrap();
        assert_eq!(exams[0].start_time, start);
        assert_eq!(exams[0].end_time, end);
    }
}
