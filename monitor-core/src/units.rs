//! Temperature unit conversion.
//!
//! OpenWeather reports temperatures in Kelvin unless asked otherwise; the
//! monitor always requests raw values and converts here, so the rest of the
//! pipeline only ever sees Celsius.

/// Convert a Kelvin temperature to Celsius.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - 273.15
}
