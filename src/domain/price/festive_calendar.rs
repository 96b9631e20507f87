//! Festive calendar - named, weighted month-day ranges

use super::PriceDataPoint;
use crate::shared::types::MonthDay;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A recurring festive window. Bounds are inclusive; a range whose start
/// is after its end wraps the year boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestivePeriod {
    pub name: String,
    pub start: MonthDay,
    pub end: MonthDay,
    pub weightage: f64,
}

impl FestivePeriod {
    pub fn new(name: &str, start: (u32, u32), end: (u32, u32), weightage: f64) -> Self {
        Self {
            name: name.to_string(),
            start: MonthDay { month: start.0, day: start.1 },
            end: MonthDay { month: end.0, day: end.1 },
            weightage,
        }
    }

    pub fn wraps_year(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, day: MonthDay) -> bool {
        if self.wraps_year() {
            day >= self.start || day <= self.end
        } else {
            day >= self.start && day <= self.end
        }
    }
}

/// Festive periods in India
pub fn default_festive_periods() -> Vec<FestivePeriod> {
    vec![
        FestivePeriod::new("Diwali", (10, 15), (11, 15), 1.5),
        FestivePeriod::new("Dussehra", (9, 20), (10, 20), 1.3),
        FestivePeriod::new("Holi", (2, 25), (3, 25), 1.2),
        // Approximate, moves with the lunar calendar
        FestivePeriod::new("Eid", (4, 1), (5, 1), 1.2),
        FestivePeriod::new("Christmas", (12, 15), (12, 31), 1.4),
        FestivePeriod::new("New Year", (12, 25), (1, 15), 1.3),
        FestivePeriod::new("Valentine's Day", (2, 10), (2, 18), 1.1),
        FestivePeriod::new("Mother's Day", (5, 5), (5, 15), 1.1),
    ]
}

/// Result of a festive lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestiveCheck {
    pub is_festive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weightage: Option<f64>,
}

impl FestiveCheck {
    pub fn not_festive() -> Self {
        Self {
            is_festive: false,
            period: None,
            weightage: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FestiveCalendar {
    periods: Vec<FestivePeriod>,
}

impl Default for FestiveCalendar {
    fn default() -> Self {
        Self::new(default_festive_periods())
    }
}

impl FestiveCalendar {
    pub fn new(periods: Vec<FestivePeriod>) -> Self {
        Self { periods }
    }

    /// First period in table order containing `date`
    pub fn period_for(&self, date: NaiveDate) -> Option<&FestivePeriod> {
        let day = MonthDay::from_date(date);
        self.periods.iter().find(|p| p.contains(day))
    }

    pub fn is_festive(&self, date: NaiveDate) -> bool {
        self.period_for(date).is_some()
    }

    pub fn detect(&self, date: NaiveDate) -> FestiveCheck {
        match self.period_for(date) {
            Some(period) => FestiveCheck {
                is_festive: true,
                period: Some(period.name.clone()),
                weightage: Some(period.weightage),
            },
            None => FestiveCheck::not_festive(),
        }
    }

    /// True when `date` or any of the next `days_before` days is festive
    pub fn is_near_festive(&self, date: NaiveDate, days_before: i64) -> bool {
        (0..=days_before).any(|offset| {
            date.checked_add_signed(Duration::days(offset))
                .map(|d| self.is_festive(d))
                .unwrap_or(false)
        })
    }

    /// Fill missing festive flags from the calendar; explicit flags are kept
    pub fn annotate(&self, history: &[PriceDataPoint]) -> Vec<PriceDataPoint> {
        history
            .iter()
            .map(|point| {
                let mut point = point.clone();
                if point.is_festive_period.is_none() {
                    point.is_festive_period = Some(self.is_festive(point.date));
                }
                point
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_detects_simple_range() {
        let calendar = FestiveCalendar::default();
        let check = calendar.detect(date("2024-11-01"));
        assert!(check.is_festive);
        assert_eq!(check.period.as_deref(), Some("Diwali"));
        assert_eq!(check.weightage, Some(1.5));

        // inclusive bounds
        assert!(calendar.is_festive(date("2024-10-15")));
        assert!(calendar.is_festive(date("2024-11-15")));
    }

    #[test]
    fn test_wraps_year_boundary() {
        let calendar = FestiveCalendar::default();
        assert_eq!(calendar.detect(date("2024-01-02")).period.as_deref(), Some("New Year"));
        assert_eq!(calendar.detect(date("2024-01-15")).period.as_deref(), Some("New Year"));
        assert!(!calendar.is_festive(date("2024-01-16")));
    }

    #[test]
    fn test_first_match_wins() {
        let calendar = FestiveCalendar::default();
        // Christmas and New Year overlap; Christmas is listed first
        assert_eq!(calendar.detect(date("2024-12-28")).period.as_deref(), Some("Christmas"));
        // Diwali and Dussehra overlap in mid October
        assert_eq!(calendar.detect(date("2024-10-18")).period.as_deref(), Some("Diwali"));
    }

    #[test]
    fn test_not_festive() {
        let calendar = FestiveCalendar::default();
        assert_eq!(calendar.detect(date("2024-07-01")), FestiveCheck::not_festive());
    }

    #[test]
    fn test_near_festive() {
        let calendar = FestiveCalendar::default();
        // Valentine's Day starts 02-10
        assert!(!calendar.is_festive(date("2024-02-05")));
        assert!(calendar.is_near_festive(date("2024-02-05"), 7));
        assert!(calendar.is_near_festive(date("2024-02-03"), 7));
        assert!(!calendar.is_near_festive(date("2024-02-02"), 7));
        assert!(!calendar.is_near_festive(date("2024-02-05"), 4));
    }

    #[test]
    fn test_custom_table() {
        let calendar = FestiveCalendar::new(vec![FestivePeriod::new("Sale", (7, 1), (7, 3), 2.0)]);
        assert!(calendar.is_festive(date("2024-07-02")));
        assert!(!calendar.is_festive(date("2024-11-01")));
    }

    #[test]
    fn test_annotate_keeps_explicit_flags() {
        let calendar = FestiveCalendar::default();
        let mut explicit = PriceDataPoint::new("P", date("2024-11-01"), 10.0, "web");
        explicit.is_festive_period = Some(false);
        let history = vec![
            explicit,
            PriceDataPoint::new("P", date("2024-11-02"), 10.0, "web"),
            PriceDataPoint::new("P", date("2024-07-02"), 10.0, "web"),
        ];

        let annotated = calendar.annotate(&history);
        assert_eq!(annotated[0].is_festive_period, Some(false));
        assert_eq!(annotated[1].is_festive_period, Some(true));
        assert_eq!(annotated[2].is_festive_period, Some(false));
    }
}
