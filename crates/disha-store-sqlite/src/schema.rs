//! SQL schema for the disha SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Every entity is keyed by a `COLLATE NOCASE` unique name column, so the
/// insert-or-ignore writes treat names as case-insensitive natural keys.
/// Junction tables use composite primary keys, making duplicate link
/// inserts a conflict-is-no-op.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS subject_groups (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE COLLATE NOCASE,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

CREATE TABLE IF NOT EXISTS subjects (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE COLLATE NOCASE,
    group_id    INTEGER REFERENCES subject_groups(id),
    category    TEXT,            -- mirrors the group name at generation time
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS interests (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE COLLATE NOCASE,
    category    TEXT,            -- inherited from the first generating subject
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS subject_interests (
    subject_id  INTEGER NOT NULL REFERENCES subjects(id),
    interest_id INTEGER NOT NULL REFERENCES interests(id),
    PRIMARY KEY (subject_id, interest_id)
);

CREATE TABLE IF NOT EXISTS courses (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE COLLATE NOCASE,
    group_id    INTEGER REFERENCES subject_groups(id),
    category    TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS colleges (
    id             INTEGER PRIMARY KEY,
    name           TEXT NOT NULL UNIQUE COLLATE NOCASE,
    location_state TEXT,         -- section header from the model reply
    rating         TEXT,         -- free text, never interpreted
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS course_colleges (
    course_id   INTEGER NOT NULL REFERENCES courses(id),
    college_id  INTEGER NOT NULL REFERENCES colleges(id),
    PRIMARY KEY (course_id, college_id)
);

CREATE TABLE IF NOT EXISTS exams (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE COLLATE NOCASE,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS college_exams (
    college_id  INTEGER NOT NULL REFERENCES colleges(id),
    exam_id     INTEGER NOT NULL REFERENCES exams(id),
    PRIMARY KEY (college_id, exam_id)
);

-- The only table that is ever updated: value is overwritten on conflict.
CREATE TABLE IF NOT EXISTS cutoffs (
    id          INTEGER PRIMARY KEY,
    exam_id     INTEGER NOT NULL REFERENCES exams(id),
    college_id  INTEGER NOT NULL REFERENCES colleges(id),
    course_id   INTEGER NOT NULL REFERENCES courses(id),
    value       TEXT NOT NULL,   -- free text, not numeric
    created_at  TEXT NOT NULL,
    UNIQUE (exam_id, college_id, course_id)
);

CREATE INDEX IF NOT EXISTS subjects_group_idx ON subjects(group_id);
CREATE INDEX IF NOT EXISTS courses_group_idx  ON courses(group_id);

PRAGMA user_version = 1;
";
