use chrono::NaiveDate;

use crate::model::{DailySummary, Reading};

/// Roll a day's readings for one city into a summary.
///
/// Returns `None` when there are no readings; a summary row always describes
/// at least one observation.
pub fn summarize(city: &str, date: NaiveDate, readings: &[Reading]) -> Option<DailySummary> {
    if readings.is_empty() {
        return None;
    }

    let n = readings.len() as f64;

    let mut sum_temp = 0.0;
    let mut sum_humidity = 0.0;
    let mut sum_wind = 0.0;
    let mut max_temp = f64::NEG_INFINITY;
    let mut min_temp = f64::INFINITY;

    for r in readings {
        sum_temp += r.temperature_c;
        sum_humidity += f64::from(r.humidity_pct);
        sum_wind += r.wind_speed_mps;
        max_temp = max_temp.max(r.temperature_c);
        min_temp = min_temp.min(r.temperature_c);
    }

    Some(DailySummary {
        city: city.to_string(),
        date,
        avg_temp_c: sum_temp / n,
        max_temp_c: max_temp,
        min_temp_c: min_temp,
        avg_humidity_pct: sum_humidity / n,
        avg_wind_speed_mps: sum_wind / n,
        dominant_condition: dominant_condition(readings),
    })
}

/// Most frequent condition label. Ties go to the condition seen first.
fn dominant_condition(readings: &[Reading]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for r in readings {
        match counts.iter_mut().find(|(c, _)| *c == r.condition) {
            Some((_, n)) => *n += 1,
            None => counts.push((r.condition.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(c, n) in &counts {
        match best {
            Some((_, bn)) if n <= bn => {}
            _ => best = Some((c, n)),
        }
    }

    best.map(|(c, _)| c.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reading(temp: f64, humidity: u8, wind: f64, condition: &str) -> Reading {
        Reading {
            city: "Delhi".to_string(),
            temperature_c: temp,
            feels_like_c: temp,
            condition: condition.to_string(),
            humidity_pct: humidity,
            wind_speed_mps: wind,
            observed_at: Utc::now(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
    }

    #[test]
    fn averages_and_extremes() {
        let readings = [
            reading(10.0, 40, 2.0, "Haze"),
            reading(20.0, 60, 4.0, "Haze"),
            reading(30.0, 50, 3.0, "Haze"),
        ];

        let summary = summarize("Delhi", day(), &readings).expect("non-empty input");

        assert_eq!(summary.city, "Delhi");
        assert_eq!(summary.date, day());
        assert_eq!(summary.avg_temp_c, 20.0);
        assert_eq!(summary.max_temp_c, 30.0);
        assert_eq!(summary.min_temp_c, 10.0);
        assert_eq!(summary.avg_humidity_pct, 50.0);
        assert_eq!(summary.avg_wind_speed_mps, 3.0);
    }

    #[test]
    fn empty_input_yields_no_summary() {
        assert_eq!(summarize("Delhi", day(), &[]), None);
    }

    #[test]
    fn single_reading_summarizes_to_itself() {
        let summary =
            summarize("Delhi", day(), &[reading(25.0, 55, 1.5, "Clear")]).expect("one reading");

        assert_eq!(summary.avg_temp_c, 25.0);
        assert_eq!(summary.max_temp_c, 25.0);
        assert_eq!(summary.min_temp_c, 25.0);
        assert_eq!(summary.dominant_condition, "Clear");
    }

    #[test]
    fn dominant_condition_is_most_frequent() {
        let readings = [
            reading(20.0, 50, 1.0, "Haze"),
            reading(21.0, 50, 1.0, "Rain"),
            reading(22.0, 50, 1.0, "Rain"),
        ];

        let summary = summarize("Delhi", day(), &readings).expect("non-empty input");

        assert_eq!(summary.dominant_condition, "Rain");
    }

    #[test]
    fn dominant_condition_tie_prefers_first_seen() {
        let readings = [reading(20.0, 50, 1.0, "Haze"), reading(21.0, 50, 1.0, "Rain")];

        let summary = summarize("Delhi", day(), &readings).expect("non-empty input");
        assert_eq!(summary.dominant_condition, "Haze");

        let readings = [
            reading(20.0, 50, 1.0, "Rain"),
            reading(21.0, 50, 1.0, "Haze"),
            reading(22.0, 50, 1.0, "Haze"),
            reading(23.0, 50, 1.0, "Rain"),
        ];

        let summary = summarize("Delhi", day(), &readings).expect("non-empty input");
        assert_eq!(summary.dominant_condition, "Rain");
    }
}
