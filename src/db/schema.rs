//! Database schema migrations for villadesk.
//!
//! Each entry is applied once, in order, inside its own transaction. The
//! applied version is tracked in the `schema_version` table.

/// Ordered list of schema migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: core tables
    r#"
    CREATE TABLE users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        username    TEXT NOT NULL UNIQUE,
        password    TEXT NOT NULL,
        role        TEXT NOT NULL DEFAULT 'user',
        is_active   INTEGER NOT NULL DEFAULT 1,
        created_at  TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE INDEX idx_users_username ON users(username);

    CREATE TABLE properties (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        category    TEXT NOT NULL,
        name        TEXT NOT NULL,
        price       REAL NOT NULL,
        bedrooms    INTEGER NOT NULL DEFAULT 0,
        bathrooms   INTEGER NOT NULL DEFAULT 0,
        area        REAL NOT NULL DEFAULT 0,
        floor       INTEGER NOT NULL DEFAULT 0,
        parking     INTEGER NOT NULL DEFAULT 0,
        image_url   TEXT NOT NULL,
        created_at  TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE INDEX idx_properties_category ON properties(category);

    CREATE TABLE contacts (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        email       TEXT NOT NULL,
        subject     TEXT NOT NULL,
        message     TEXT NOT NULL,
        received_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    // v2: server-side session store
    r#"
    CREATE TABLE sessions (
        id          TEXT PRIMARY KEY,
        data        TEXT NOT NULL,
        expires_at  INTEGER NOT NULL
    );

    CREATE INDEX idx_sessions_expires_at ON sessions(expires_at);
    "#,
];
