//! SQLite-backed storage for daily summaries.
//!
//! The store keeps only a path and opens a fresh connection per operation.
//! `init` is destructive: it drops and recreates the table, so summaries
//! survive process restarts only if `init` is not called again. `ensure`
//! creates the schema without touching existing rows.

use rusqlite::{Connection, params};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::model::DailySummary;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS daily_summary (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    city TEXT NOT NULL,
    date TEXT NOT NULL,
    avg_temp REAL NOT NULL,
    max_temp REAL NOT NULL,
    min_temp REAL NOT NULL,
    avg_humidity REAL NOT NULL,
    avg_wind_speed REAL NOT NULL,
    dominant_weather TEXT NOT NULL
);";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("could not create database directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
}

/// A stored summary together with its row id.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub id: i64,
    pub summary: DailySummary,
}

#[derive(Debug, Clone)]
pub struct SummaryStore {
    path: PathBuf,
}

impl SummaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the schema from scratch, dropping any existing rows.
    pub fn init(&self) -> Result<(), StoreError> {
        self.create_parent_dirs()?;

        let conn = self.open()?;
        conn.execute_batch("DROP TABLE IF EXISTS daily_summary;")?;
        conn.execute_batch(CREATE_TABLE)?;

        Ok(())
    }

    /// Create the schema only if it is missing; existing rows are kept.
    pub fn ensure(&self) -> Result<(), StoreError> {
        self.create_parent_dirs()?;

        let conn = self.open()?;
        conn.execute_batch(CREATE_TABLE)?;

        Ok(())
    }

    /// Append one summary row. Duplicate (city, date) pairs are allowed;
    /// every cycle appends its own row.
    pub fn insert(&self, summary: &DailySummary) -> Result<i64, StoreError> {
        let conn = self.open()?;

        conn.execute(
            "INSERT INTO daily_summary
                 (city, date, avg_temp, max_temp, min_temp,
                  avg_humidity, avg_wind_speed, dominant_weather)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                summary.city,
                summary.date,
                summary.avg_temp_c,
                summary.max_temp_c,
                summary.min_temp_c,
                summary.avg_humidity_pct,
                summary.avg_wind_speed_mps,
                summary.dominant_condition,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// All rows in insertion order.
    pub fn query_all(&self) -> Result<Vec<SummaryRow>, StoreError> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(
            "SELECT id, city, date, avg_temp, max_temp, min_temp,
                    avg_humidity, avg_wind_speed, dominant_weather
             FROM daily_summary
             ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(SummaryRow {
                id: row.get(0)?,
                summary: DailySummary {
                    city: row.get(1)?,
                    date: row.get(2)?,
                    avg_temp_c: row.get(3)?,
                    max_temp_c: row.get(4)?,
                    min_temp_c: row.get(5)?,
                    avg_humidity_pct: row.get(6)?,
                    avg_wind_speed_mps: row.get(7)?,
                    dominant_condition: row.get(8)?,
                },
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn open(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    fn create_parent_dirs(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        Ok(())
    }
}
