use std::time::Duration;
use tokio::time;

use crate::collector::Collector;

/// Run collection cycles forever at a fixed interval.
///
/// The first cycle starts immediately. Cycles run strictly one after
/// another: when a cycle outlasts the interval, the missed ticks queue up
/// and fire back-to-back, never in parallel.
pub async fn run(collector: &mut Collector, interval: Duration) {
    let mut ticker = time::interval(interval);

    loop {
        ticker.tick().await;

        let report = collector.run_cycle().await;
        tracing::info!(
            fetched = report.fetched,
            cities = report.cities,
            alerts = report.alerts,
            summaries = report.summaries,
            failed = report.failures.len(),
            "cycle complete"
        );
    }
}
