//! Seasonal baseline calculation

use super::{PriceDataPoint, SeasonalBaseline};
use crate::shared::errors::PriceError;
use crate::shared::types::PriceRange;
use crate::shared::utils::{calculate_percentage_change, price_stats};
use chrono::Utc;
use tracing::debug;

/// Splits a history by festive flag and summarizes each side.
/// No smoothing or outlier rejection.
pub struct BaselineCalculator;

impl BaselineCalculator {
    pub fn calculate(&self, history: &[PriceDataPoint]) -> Result<SeasonalBaseline, PriceError> {
        let first = history.first().ok_or(PriceError::NoHistoricalData)?;

        let (festive, normal): (Vec<&PriceDataPoint>, Vec<&PriceDataPoint>) =
            history.iter().partition(|p| p.is_festive());
        let festive_prices: Vec<f64> = festive.iter().map(|p| p.price).collect();
        let normal_prices: Vec<f64> = normal.iter().map(|p| p.price).collect();

        let festive_stats = price_stats(&festive_prices);
        let normal_stats = price_stats(&normal_prices);

        let (normal_range, normal_average, festive_range, seasonal_increase) = match (normal_stats, festive_stats) {
            (Some((n_min, n_max, n_avg)), Some((f_min, f_max, f_avg))) => (
                PriceRange::new(n_min, n_max),
                n_avg,
                PriceRange::new(f_min, f_max),
                calculate_percentage_change(n_avg, f_avg),
            ),
            (Some((min, max, avg)), None) | (None, Some((min, max, avg))) => {
                let range = PriceRange::new(min, max);
                (range, avg, range, 0.0)
            }
            // history is non-empty, so one side has prices
            (None, None) => return Err(PriceError::NoHistoricalData),
        };

        debug!(
            "Baseline for {}: {} normal / {} festive points, seasonal increase {:.2}%",
            first.product_id,
            normal_prices.len(),
            festive_prices.len(),
            seasonal_increase
        );

        Ok(SeasonalBaseline {
            product_id: first.product_id.clone(),
            normal_price_range: normal_range,
            festive_baseline: festive_range,
            normal_average,
            average_seasonal_increase: seasonal_increase,
            last_updated: Utc::now(),
        })
    }
}

/// Baseline for a product history; fails on an empty history
pub fn calculate_baseline_price(history: &[PriceDataPoint]) -> Result<SeasonalBaseline, PriceError> {
    BaselineCalculator.calculate(history)
}
