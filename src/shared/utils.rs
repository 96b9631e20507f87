//! Utility functions and helpers

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt::Display;

/// Calculate percentage change
pub fn calculate_percentage_change(old_value: f64, new_value: f64) -> f64 {
    if old_value > 0.0 {
        ((new_value - old_value) / old_value) * 100.0
    } else {
        0.0
    }
}

/// Min, max and mean of a non-empty slice
pub fn price_stats(prices: &[f64]) -> Option<(f64, f64, f64)> {
    if prices.is_empty() {
        return None;
    }
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = prices.iter().sum::<f64>() / prices.len() as f64;
    Some((min, max, avg))
}

/// Midnight UTC of a calendar date
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Alert id: `alert_<unix-millis>_<suffix>`
pub fn generate_alert_id(suffix: impl Display) -> String {
    format!("alert_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_change() {
        assert_eq!(calculate_percentage_change(100.0, 150.0), 50.0);
        assert_eq!(calculate_percentage_change(200.0, 100.0), -50.0);
        assert_eq!(calculate_percentage_change(0.0, 100.0), 0.0);
    }

    #[test]
    fn test_price_stats() {
        assert_eq!(price_stats(&[]), None);
        assert_eq!(price_stats(&[120.0, 80.0, 100.0]), Some((80.0, 120.0, 100.0)));
    }

    #[test]
    fn test_alert_id_format() {
        let id = generate_alert_id("baseline");
        assert!(id.starts_with("alert_"));
        assert!(id.ends_with("_baseline"));
    }
}
