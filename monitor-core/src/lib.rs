//! Core library for the `weather-monitor` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The OpenWeatherMap client and the provider abstraction
//! - Threshold alerting and email delivery
//! - Daily aggregation and the SQLite summary store
//! - The collection cycle and its fixed-interval scheduler
//!
//! It is used by `monitor-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod alert;
pub mod collector;
pub mod config;
pub mod model;
pub mod notify;
pub mod provider;
pub mod scheduler;
pub mod store;
pub mod units;

pub use alert::{AlertEvaluator, AlertEvent};
pub use collector::{CityFailure, Collector, CycleReport};
pub use config::Config;
pub use model::{DailySummary, Reading};
pub use notify::{DeliveryError, EmailAlerter, Notifier};
pub use provider::openweather::OpenWeatherProvider;
pub use provider::{FetchError, WeatherProvider, provider_from_config};
pub use store::{SummaryRow, SummaryStore};
