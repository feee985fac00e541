use chrono::Local;
use std::collections::HashMap;

use crate::{
    aggregate,
    alert::AlertEvaluator,
    config::Config,
    model::Reading,
    notify::{EmailAlerter, Notifier},
    provider::WeatherProvider,
    store::SummaryStore,
};

/// A city whose fetch failed this cycle, with the HTTP status recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityFailure {
    pub city: String,
    pub status: u16,
}

/// What one collection cycle did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Cities attempted.
    pub cities: usize,
    /// Cities fetched successfully.
    pub fetched: usize,
    /// Alert events raised.
    pub alerts: usize,
    /// Summary rows written to the store.
    pub summaries: usize,
    pub failures: Vec<CityFailure>,
}

/// Owns everything one monitoring run needs: the provider, per-city reading
/// buffers, alert state, the optional alert notifier and the summary store.
///
/// Alert counters live here and persist across cycles; reading buffers are
/// drained at the end of every cycle.
#[derive(Debug)]
pub struct Collector {
    cities: Vec<String>,
    provider: Box<dyn WeatherProvider>,
    alerts: AlertEvaluator,
    notifier: Option<Box<dyn Notifier>>,
    store: SummaryStore,
    buffers: HashMap<String, Vec<Reading>>,
}

impl Collector {
    pub fn new(
        config: &Config,
        provider: Box<dyn WeatherProvider>,
        store: SummaryStore,
    ) -> anyhow::Result<Self> {
        let notifier: Option<Box<dyn Notifier>> = if config.email.enabled {
            Some(Box::new(EmailAlerter::from_config(&config.email)?))
        } else {
            None
        };

        Ok(Self {
            cities: config.cities.clone(),
            provider,
            alerts: AlertEvaluator::new(
                config.alerts.temperature_threshold_c,
                config.alerts.consecutive_breaches,
            ),
            notifier,
            store,
            buffers: HashMap::new(),
        })
    }

    /// Replace the alert delivery channel, e.g. with a recording one in
    /// tests.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Fetch every configured city once, evaluate alerts, then summarize and
    /// store whatever was buffered. Failures are logged and reported, never
    /// propagated; one bad city does not stop the others.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let cities = self.cities.clone();
        let cycle_date = Local::now().date_naive();
        let mut report = CycleReport { cities: cities.len(), ..CycleReport::default() };

        for city in &cities {
            match self.provider.fetch_current(city).await {
                Ok(reading) => {
                    tracing::info!(
                        city = %city,
                        temperature_c = reading.temperature_c,
                        condition = %reading.condition,
                        "fetched current weather"
                    );

                    if let Some(event) = self.alerts.observe(city, reading.temperature_c) {
                        tracing::warn!(
                            city = %event.city,
                            temperature_c = event.temperature_c,
                            breaches = event.breaches,
                            "temperature above threshold"
                        );
                        report.alerts += 1;

                        if let Some(notifier) = &self.notifier {
                            match notifier.send_alert(&event).await {
                                Ok(()) => tracing::info!(
                                    city = %event.city,
                                    temperature_c = event.temperature_c,
                                    "alert email sent"
                                ),
                                Err(err) => tracing::error!(
                                    city = %event.city,
                                    error = %err,
                                    "failed to send alert email"
                                ),
                            }
                        }
                    }

                    self.buffers.entry(city.clone()).or_default().push(reading);
                    report.fetched += 1;
                }
                Err(err) => {
                    let status = err.status_code();
                    tracing::warn!(city = %city, status, error = %err, "fetch failed");
                    report.failures.push(CityFailure { city: city.clone(), status });
                }
            }
        }

        for city in &cities {
            let Some(readings) = self.buffers.remove(city) else { continue };

            // The buffer is gone whether or not the insert succeeds; a
            // cycle's readings never leak into the next one.
            if let Some(summary) = aggregate::summarize(city, cycle_date, &readings) {
                match self.store.insert(&summary) {
                    Ok(id) => {
                        tracing::info!(
                            city = %city,
                            id,
                            avg_temp_c = summary.avg_temp_c,
                            dominant = %summary.dominant_condition,
                            "wrote daily summary"
                        );
                        report.summaries += 1;
                    }
                    Err(err) => {
                        tracing::error!(
                            city = %city,
                            error = %err,
                            "failed to store daily summary"
                        );
                    }
                }
            }
        }

        report
    }
}
