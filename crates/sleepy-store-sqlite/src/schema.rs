//! SQL schema for the Sleepy SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS people (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    firstname  TEXT NOT NULL CHECK (length(firstname) BETWEEN 1 AND 80),
    lastname   TEXT NOT NULL CHECK (length(lastname)  BETWEEN 1 AND 80),
    created    TEXT NOT NULL    -- RFC 3339 UTC, fixed microsecond precision
);

-- Deleting a person leaves their items in place, unowned.
CREATE TABLE IF NOT EXISTS items (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 100),
    person_id    INTEGER REFERENCES people(id) ON DELETE SET NULL,
    checked_out  INTEGER NOT NULL DEFAULT 0,
    updated      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS items_updated_idx ON items(updated);
CREATE INDEX IF NOT EXISTS items_person_idx  ON items(person_id);
CREATE INDEX IF NOT EXISTS people_created_idx ON people(created);

PRAGMA user_version = 1;
";

/// Drops both tables. Run [`SCHEMA`] afterwards to recreate them.
pub const DROP: &str = "
DROP TABLE IF EXISTS items;
DROP TABLE IF EXISTS people;
";
