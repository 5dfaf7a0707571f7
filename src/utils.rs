//! Utility functions for the rating engine

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Round `x` to the given number of decimal places
pub fn round_places(x: f64, places: i32) -> f64 {
    if x == 0.0 {
        return 0.0;
    }

    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_places() {
        assert_eq!(round_places(1628.8158, 1), 1628.8);
        assert_eq!(round_places(1593.1842, 2), 1593.18);
        assert_eq!(round_places(-12.345, 0), -12.0);
        assert_eq!(round_places(0.0, 3), 0.0);
    }
}
