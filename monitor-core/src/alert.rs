use std::collections::HashMap;

/// Raised when a city's temperature has stayed above the threshold for the
/// configured number of consecutive readings.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub city: String,
    pub temperature_c: f64,
    pub threshold_c: f64,
    /// Consecutive breaching readings seen so far, including this one.
    pub breaches: u32,
}

/// Tracks consecutive threshold breaches per city.
///
/// A reading strictly above the threshold increments the city's counter; a
/// reading at or below it resets the counter to zero. Once the counter
/// reaches the configured minimum the evaluator fires, and keeps firing on
/// every further breach until the city recovers.
#[derive(Debug)]
pub struct AlertEvaluator {
    threshold_c: f64,
    consecutive: u32,
    counters: HashMap<String, u32>,
}

impl AlertEvaluator {
    pub fn new(threshold_c: f64, consecutive: u32) -> Self {
        Self { threshold_c, consecutive, counters: HashMap::new() }
    }

    /// Feed one reading for a city. Returns an event when the alert condition
    /// holds after this reading.
    pub fn observe(&mut self, city: &str, temperature_c: f64) -> Option<AlertEvent> {
        let counter = self.counters.entry(city.to_string()).or_insert(0);

        if temperature_c > self.threshold_c {
            *counter += 1;
        } else {
            *counter = 0;
            return None;
        }

        if *counter >= self.consecutive {
            Some(AlertEvent {
                city: city.to_string(),
                temperature_c,
                threshold_c: self.threshold_c,
                breaches: *counter,
            })
        } else {
            None
        }
    }

    /// Current consecutive-breach count for a city.
    pub fn breach_count(&self, city: &str) -> u32 {
        self.counters.get(city).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_two_consecutive_breaches() {
        let mut eval = AlertEvaluator::new(35.0, 2);

        assert_eq!(eval.observe("Delhi", 36.0), None);
        let event = eval.observe("Delhi", 36.5).expect("second breach must fire");

        assert_eq!(event.city, "Delhi");
        assert_eq!(event.temperature_c, 36.5);
        assert_eq!(event.threshold_c, 35.0);
        assert_eq!(event.breaches, 2);
    }

    #[test]
    fn recovery_resets_the_counter() {
        let mut eval = AlertEvaluator::new(35.0, 2);

        assert_eq!(eval.observe("Delhi", 36.0), None);
        assert_eq!(eval.observe("Delhi", 10.0), None);
        assert_eq!(eval.breach_count("Delhi"), 0);

        // The earlier breach no longer counts.
        assert_eq!(eval.observe("Delhi", 36.0), None);
    }

    #[test]
    fn keeps_firing_while_breaches_continue() {
        let mut eval = AlertEvaluator::new(35.0, 2);

        assert_eq!(eval.observe("Delhi", 36.0), None);
        assert!(eval.observe("Delhi", 36.0).is_some());
        let third = eval.observe("Delhi", 37.0).expect("still above threshold");

        assert_eq!(third.breaches, 3);
    }

    #[test]
    fn reading_at_threshold_is_not_a_breach() {
        let mut eval = AlertEvaluator::new(35.0, 1);

        assert_eq!(eval.observe("Delhi", 35.0), None);
        assert_eq!(eval.breach_count("Delhi"), 0);
    }

    #[test]
    fn single_breach_minimum_fires_immediately() {
        let mut eval = AlertEvaluator::new(35.0, 1);

        assert!(eval.observe("Delhi", 35.1).is_some());
    }

    #[test]
    fn cities_are_tracked_independently() {
        let mut eval = AlertEvaluator::new(35.0, 2);

        assert_eq!(eval.observe("Delhi", 36.0), None);
        assert_eq!(eval.observe("Mumbai", 36.0), None);

        // Mumbai recovers; Delhi's streak is unaffected.
        assert_eq!(eval.observe("Mumbai", 20.0), None);
        assert!(eval.observe("Delhi", 36.0).is_some());

        assert_eq!(eval.breach_count("Delhi"), 2);
        assert_eq!(eval.breach_count("Mumbai"), 0);
    }
}
