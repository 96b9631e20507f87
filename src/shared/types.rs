//! Common types used across the application

use crate::shared::errors::PriceError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Year-independent calendar position, written as `MM-DD`.
///
/// Ordering is month first, then day, which matches comparing the
/// zero-padded `MM-DD` tokens as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Result<Self, PriceError> {
        // 2000 is a leap year, so 02-29 is accepted
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(PriceError::InvalidMonthDay(format!("{:02}-{:02}", month, day)));
        }
        Ok(Self { month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PriceError::InvalidMonthDay(s.to_string());
        let (month, day) = s.split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 || day.len() != 2 {
            return Err(invalid());
        }
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let day = day.parse::<u32>().map_err(|_| invalid())?;
        Self::new(month, day)
    }
}

impl TryFrom<String> for MonthDay {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthDay> for String {
    fn from(value: MonthDay) -> Self {
        value.to_string()
    }
}

/// Inclusive price range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Risk tier shared by price and verification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_day_parsing() {
        let md: MonthDay = "12-25".parse().unwrap();
        assert_eq!(md, MonthDay { month: 12, day: 25 });
        assert_eq!(md.to_string(), "12-25");

        assert!("13-01".parse::<MonthDay>().is_err());
        assert!("02-30".parse::<MonthDay>().is_err());
        assert!("1225".parse::<MonthDay>().is_err());
        assert!("1-5".parse::<MonthDay>().is_err());
        assert!("02-29".parse::<MonthDay>().is_ok());
    }

    #[test]
    fn test_month_day_ordering_matches_tokens() {
        let a: MonthDay = "01-15".parse().unwrap();
        let b: MonthDay = "12-25".parse().unwrap();
        assert!(a < b);
        assert_eq!(a.to_string() < b.to_string(), a < b);
    }

    #[test]
    fn test_month_day_serde() {
        let md: MonthDay = serde_json::from_str("\"10-15\"").unwrap();
        assert_eq!(md, MonthDay { month: 10, day: 15 });
        assert_eq!(serde_json::to_string(&md).unwrap(), "\"10-15\"");
        assert!(serde_json::from_str::<MonthDay>("\"10/15\"").is_err());
    }

    #[test]
    fn test_risk_level_serialization() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
        assert_eq!(RiskLevel::Medium.to_string(), "medium");
        assert!(RiskLevel::Low < RiskLevel::High);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let range = PriceRange::new(1000.0, 1100.0);
        assert!(range.contains(1000.0));
        assert!(range.contains(1100.0));
        assert!(!range.contains(999.99));
        assert!(!range.contains(1100.01));
    }
}
