//! SQL schema for the rollcall SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS students (
    student_id TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    course     TEXT NOT NULL,
    section    TEXT NOT NULL    -- one section, or several joined with ','
);

-- Attendance rows copy the student fields at scan time; no foreign key.
CREATE TABLE IF NOT EXISTS attendance (
    record_id  TEXT PRIMARY KEY,   -- server-assigned UUID
    student_id TEXT NOT NULL,
    name       TEXT NOT NULL,
    course     TEXT NOT NULL,
    section    TEXT NOT NULL,
    time_in    TEXT NOT NULL,      -- RFC 3339 UTC
    subject    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS attendance_section_idx ON attendance(section);

PRAGMA user_version = 1;
";
