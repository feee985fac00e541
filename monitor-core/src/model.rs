use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One normalized observation for a city at a point in time.
///
/// Readings are ephemeral: they live in the collector's per-city buffer for
/// the duration of a single collection cycle and are dropped once folded
/// into a [`DailySummary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub city: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    /// Condition label from the provider, e.g. "Clear" or "Rain".
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Provider-reported observation time.
    pub observed_at: DateTime<Utc>,
}

/// Aggregate statistics for one city over one collection cycle.
///
/// Immutable once written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub city: String,
    /// Calendar date the cycle started on, not a per-reading date.
    pub date: NaiveDate,
    pub avg_temp_c: f64,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub avg_humidity_pct: f64,
    pub avg_wind_speed_mps: f64,
    /// Most frequent condition label among the cycle's readings.
    pub dominant_condition: String,
}
