//! PNG charts over the stored daily summaries.
//!
//! Three grouped bar charts (one bar group per date, one bar per city) for
//! average temperature, humidity and wind speed, plus a frequency chart of
//! dominant weather conditions.

use anyhow::{Result, ensure};
use chrono::NaiveDate;
use monitor_core::SummaryRow;
use plotters::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy)]
enum Metric {
    Temperature,
    Humidity,
    WindSpeed,
}

impl Metric {
    fn title(self) -> &'static str {
        match self {
            Metric::Temperature => "Average Temperature by City",
            Metric::Humidity => "Average Humidity by City",
            Metric::WindSpeed => "Average Wind Speed by City",
        }
    }

    fn y_desc(self) -> &'static str {
        match self {
            Metric::Temperature => "Average Temperature (°C)",
            Metric::Humidity => "Average Humidity (%)",
            Metric::WindSpeed => "Average Wind Speed (m/s)",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Metric::Temperature => "average_temperature.png",
            Metric::Humidity => "average_humidity.png",
            Metric::WindSpeed => "average_wind_speed.png",
        }
    }

    fn value(self, row: &SummaryRow) -> f64 {
        match self {
            Metric::Temperature => row.summary.avg_temp_c,
            Metric::Humidity => row.summary.avg_humidity_pct,
            Metric::WindSpeed => row.summary.avg_wind_speed_mps,
        }
    }
}

/// Render all four charts into `out_dir`, returning the written paths.
pub fn render_all(rows: &[SummaryRow], out_dir: &Path) -> Result<Vec<PathBuf>> {
    ensure!(!rows.is_empty(), "no summaries to chart");

    fs::create_dir_all(out_dir)?;

    let written = vec![
        render_metric_chart(rows, out_dir, Metric::Temperature)?,
        render_metric_chart(rows, out_dir, Metric::Humidity)?,
        render_metric_chart(rows, out_dir, Metric::WindSpeed)?,
        render_condition_chart(rows, out_dir)?,
    ];

    Ok(written)
}

fn render_metric_chart(rows: &[SummaryRow], out_dir: &Path, metric: Metric) -> Result<PathBuf> {
    let dates = distinct_dates(rows);
    let cities = distinct_cities(rows);
    let path = out_dir.join(metric.file_name());

    let lo = rows.iter().map(|r| metric.value(r)).fold(f64::INFINITY, f64::min).min(0.0);
    let hi = rows.iter().map(|r| metric.value(r)).fold(f64::NEG_INFINITY, f64::max).max(0.0);
    let pad = ((hi - lo) * 0.1).max(1.0);
    let y_start = if lo < 0.0 { lo - pad } else { 0.0 };

    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_end = dates.len() as f64 - 0.5;
    let mut chart = ChartBuilder::on(&root)
        .caption(metric.title(), ("sans-serif", 5.percent_height()))
        .margin(1.percent())
        .x_label_area_size(8.percent_height())
        .y_label_area_size(8.percent_width())
        .build_cartesian_2d(-0.5_f64..x_end, y_start..hi + pad)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(metric.y_desc())
        .x_labels(dates.len())
        .x_label_formatter(&|x: &f64| date_label(*x, &dates))
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    // One bar per city inside each date's slot.
    let slot = 0.8 / cities.len() as f64;

    for (ci, city) in cities.iter().enumerate() {
        let color = Palette99::pick(ci);

        let bars = dates.iter().enumerate().filter_map(|(di, date)| {
            mean_value(rows, city, *date, metric).map(|value| {
                let x0 = di as f64 - 0.4 + slot * ci as f64;
                Rectangle::new([(x0, 0.0), (x0 + slot, value)], color.filled())
            })
        });

        chart
            .draw_series(bars)?
            .label(city.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    drop(chart);
    drop(root);

    Ok(path)
}

fn render_condition_chart(rows: &[SummaryRow], out_dir: &Path) -> Result<PathBuf> {
    let counts = condition_counts(rows);
    let path = out_dir.join("dominant_weather_conditions.png");

    let y_max = counts.iter().map(|(_, n)| *n).max().unwrap_or(1) as f64;

    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_end = counts.len() as f64 - 0.5;
    let mut chart = ChartBuilder::on(&root)
        .caption("Dominant Weather Conditions", ("sans-serif", 5.percent_height()))
        .margin(1.percent())
        .x_label_area_size(8.percent_height())
        .y_label_area_size(8.percent_width())
        .build_cartesian_2d(-0.5_f64..x_end, 0.0..y_max * 1.2)?;

    chart
        .configure_mesh()
        .x_desc("Weather Condition")
        .y_desc("Count")
        .x_labels(counts.len())
        .x_label_formatter(&|x: &f64| condition_label(*x, &counts))
        .light_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, (_, n))| {
        let x = i as f64;
        Rectangle::new([(x - 0.3, 0.0), (x + 0.3, *n as f64)], Palette99::pick(i).filled())
    }))?;

    root.present()?;
    drop(chart);
    drop(root);

    Ok(path)
}

fn date_label(x: f64, dates: &[NaiveDate]) -> String {
    if x < -0.25 {
        return String::new();
    }

    dates
        .get(x.round() as usize)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn condition_label(x: f64, counts: &[(String, usize)]) -> String {
    if x < -0.25 {
        return String::new();
    }

    counts.get(x.round() as usize).map(|(c, _)| c.clone()).unwrap_or_default()
}

/// All dates present, ascending.
fn distinct_dates(rows: &[SummaryRow]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = rows.iter().map(|r| r.summary.date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// All cities present, in first-seen order.
fn distinct_cities(rows: &[SummaryRow]) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();

    for row in rows {
        if !cities.iter().any(|c| c == &row.summary.city) {
            cities.push(row.summary.city.clone());
        }
    }

    cities
}

/// Mean of a metric over every row matching (city, date). A city can have
/// several rows for one date; the bar shows their average.
fn mean_value(rows: &[SummaryRow], city: &str, date: NaiveDate, metric: Metric) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;

    for row in rows {
        if row.summary.city == city && row.summary.date == date {
            sum += metric.value(row);
            n += 1;
        }
    }

    (n > 0).then(|| sum / n as f64)
}

/// Dominant-condition frequencies, most frequent first. Stable sort keeps
/// first-seen order on ties.
fn condition_counts(rows: &[SummaryRow]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for row in rows {
        match counts.iter_mut().find(|(c, _)| c == &row.summary.dominant_condition) {
            Some((_, n)) => *n += 1,
            None => counts.push((row.summary.dominant_condition.clone(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
