//! Price domain - festive calendar, seasonal baselines and manipulation scoring

mod baseline;
mod festive_calendar;
mod history_source;
mod price_analyzer;

pub use baseline::{calculate_baseline_price, BaselineCalculator};
pub use festive_calendar::{default_festive_periods, FestiveCalendar, FestiveCheck, FestivePeriod};
pub use history_source::PriceHistorySource;
pub use price_analyzer::{detect_price_manipulation, PriceAnalyzer};

use crate::shared::types::PriceRange;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One observed price for a product at a source on a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDataPoint {
    pub product_id: String,
    pub date: NaiveDate,
    pub price: f64,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_festive_period: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
}

impl PriceDataPoint {
    pub fn new(product_id: impl Into<String>, date: NaiveDate, price: f64, source: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            date,
            price,
            source: source.into(),
            is_festive_period: None,
            discount_percentage: None,
        }
    }

    pub fn festive(mut self) -> Self {
        self.is_festive_period = Some(true);
        self
    }

    pub fn with_discount(mut self, discount_percentage: f64) -> Self {
        self.discount_percentage = Some(discount_percentage);
        self
    }

    pub fn is_festive(&self) -> bool {
        self.is_festive_period.unwrap_or(false)
    }
}

/// Expected normal/festive price ranges derived from a product's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalBaseline {
    pub product_id: String,
    pub normal_price_range: PriceRange,
    pub festive_baseline: PriceRange,
    pub normal_average: f64,
    pub average_seasonal_increase: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    ArtificialInflation,
    SuspiciousSpike,
    FakeDiscount,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::ArtificialInflation => "artificial_inflation",
            AlertType::SuspiciousSpike => "suspicious_spike",
            AlertType::FakeDiscount => "fake_discount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub from: f64,
    pub to: f64,
    pub percentage_increase: f64,
}

/// A single detection emitted by the manipulation scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub price_change: PriceChange,
    pub alert_type: AlertType,
    pub confidence_score: f64,
    pub detected_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub festive_period: Option<String>,
    pub recommendation: String,
}

/// Score and alerts produced by one scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulationAnalysis {
    pub score: u32,
    pub alerts: Vec<PriceAlert>,
}

/// Expected-range view of a product at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAnalysis {
    pub is_festive_period: bool,
    pub expected_price_range: PriceRange,
    /// Current price lies inside `expected_price_range`
    pub within_expected_range: bool,
    pub anomaly_detected: bool,
}

/// Full per-product analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAnalysisResult {
    pub product_id: String,
    pub current_price: f64,
    pub baseline_price: f64,
    pub price_manipulation_score: u32,
    pub alerts: Vec<PriceAlert>,
    pub historical_data: Vec<PriceDataPoint>,
    pub seasonal_analysis: SeasonalAnalysis,
}

/// Price history as stored per product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductHistory {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    pub history: Vec<PriceDataPoint>,
}

impl ProductHistory {
    /// Explicit current price, or the most recent observed price
    pub fn effective_current_price(&self) -> Option<f64> {
        self.current_price.or_else(|| {
            self.history
                .iter()
                .enumerate()
                .max_by_key(|(i, p)| (p.date, *i))
                .map(|(_, p)| p.price)
        })
    }
}

/// Rise between consecutive points in the recent window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InflationRule {
    pub threshold_pct: f64,
    pub base_confidence: f64,
    pub confidence_per_pct: f64,
    pub max_confidence: f64,
    pub score: u32,
}

impl Default for InflationRule {
    fn default() -> Self {
        Self {
            threshold_pct: 50.0,
            base_confidence: 70.0,
            confidence_per_pct: 0.5,
            max_confidence: 95.0,
            score: 30,
        }
    }
}

/// Current price against the normal-range maximum
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpikeRule {
    pub threshold_pct: f64,
    pub base_confidence: f64,
    pub confidence_per_pct: f64,
    pub max_confidence: f64,
    pub score: u32,
}

impl Default for SpikeRule {
    fn default() -> Self {
        Self {
            threshold_pct: 30.0,
            base_confidence: 60.0,
            confidence_per_pct: 0.3,
            max_confidence: 90.0,
            score: 25,
        }
    }
}

/// Spike followed by a cosmetic discount
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FakeDiscountRule {
    pub spike_ratio: f64,
    pub min_discount_pct: f64,
    pub retained_ratio: f64,
    pub confidence: f64,
    pub score: u32,
}

impl Default for FakeDiscountRule {
    fn default() -> Self {
        Self {
            spike_ratio: 1.5,
            min_discount_pct: 30.0,
            retained_ratio: 0.95,
            confidence: 85.0,
            score: 20,
        }
    }
}

/// Price manipulation detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceDetectionConfig {
    pub recent_window: usize,
    pub near_festive_days: i64,
    pub max_score: u32,
    pub inflation: InflationRule,
    pub spike: SpikeRule,
    pub fake_discount: FakeDiscountRule,
}

impl Default for PriceDetectionConfig {
    fn default() -> Self {
        Self {
            recent_window: 10,
            near_festive_days: 7,
            max_score: 100,
            inflation: InflationRule::default(),
            spike: SpikeRule::default(),
            fake_discount: FakeDiscountRule::default(),
        }
    }
}
