//! Price manipulation scoring

use super::{
    AlertType, FestiveCalendar, ManipulationAnalysis, PriceAlert, PriceChange, PriceDataPoint,
    PriceDetectionConfig, SeasonalBaseline,
};
use crate::shared::utils::{calculate_percentage_change, generate_alert_id, start_of_day};
use chrono::Utc;
use tracing::debug;

const INFLATION_RECOMMENDATION: &str = "Investigate sudden price increase before festive discount period";
const SPIKE_RECOMMENDATION: &str = "Current price significantly above historical baseline";
const FAKE_DISCOUNT_RECOMMENDATION: &str =
    "Potential fake discount scheme detected - price artificially inflated before discount";

fn product_name(product_id: &str) -> String {
    format!("Product {}", product_id)
}

fn weighted(alerts: usize, score: u32) -> u32 {
    u32::try_from(alerts).unwrap_or(u32::MAX).saturating_mul(score)
}

/// Runs the three detection passes over a product's history.
///
/// Passes are independent; they contribute to the score additively and
/// their alerts are emitted in pass order: artificial inflation, baseline
/// spike, fake discount.
pub struct PriceAnalyzer {
    config: PriceDetectionConfig,
    calendar: FestiveCalendar,
}

impl Default for PriceAnalyzer {
    fn default() -> Self {
        Self::new(PriceDetectionConfig::default(), FestiveCalendar::default())
    }
}

impl PriceAnalyzer {
    pub fn new(config: PriceDetectionConfig, calendar: FestiveCalendar) -> Self {
        Self { config, calendar }
    }

    pub fn calendar(&self) -> &FestiveCalendar {
        &self.calendar
    }

    pub fn detect(
        &self,
        current_price: f64,
        history: &[PriceDataPoint],
        baseline: &SeasonalBaseline,
    ) -> ManipulationAnalysis {
        let mut sorted = history.to_vec();
        sorted.sort_by_key(|p| p.date);

        let inflation = self.detect_artificial_inflation(&sorted);
        let spike = self.detect_baseline_spike(current_price, baseline);
        let fake_discounts = self.detect_fake_discounts(&sorted);

        let raw_score = weighted(inflation.len(), self.config.inflation.score)
            .saturating_add(weighted(spike.iter().count(), self.config.spike.score))
            .saturating_add(weighted(fake_discounts.len(), self.config.fake_discount.score));
        let score = raw_score.min(self.config.max_score);

        let mut alerts = inflation;
        alerts.extend(spike);
        alerts.extend(fake_discounts);

        debug!(
            "Product {}: manipulation score {} (raw {}) with {} alerts",
            baseline.product_id,
            score,
            raw_score,
            alerts.len()
        );

        ManipulationAnalysis { score, alerts }
    }

    /// Large rises in the recent window landing in or just before a festive period
    fn detect_artificial_inflation(&self, sorted: &[PriceDataPoint]) -> Vec<PriceAlert> {
        let rule = &self.config.inflation;
        let window_start = sorted.len().saturating_sub(self.config.recent_window);
        let recent = &sorted[window_start..];

        let mut alerts = Vec::new();
        for (i, pair) in recent.windows(2).enumerate() {
            let (prev, curr) = (&pair[0], &pair[1]);
            let increase = calculate_percentage_change(prev.price, curr.price);
            if increase <= rule.threshold_pct {
                continue;
            }

            let festive = self.calendar.detect(curr.date);
            if !festive.is_festive && !self.calendar.is_near_festive(curr.date, self.config.near_festive_days) {
                continue;
            }

            alerts.push(PriceAlert {
                id: generate_alert_id(i + 1),
                product_id: curr.product_id.clone(),
                product_name: product_name(&curr.product_id),
                price_change: PriceChange {
                    from: prev.price,
                    to: curr.price,
                    percentage_increase: increase,
                },
                alert_type: AlertType::ArtificialInflation,
                confidence_score: rule
                    .max_confidence
                    .min(rule.base_confidence + (increase - rule.threshold_pct) * rule.confidence_per_pct),
                detected_at: start_of_day(curr.date),
                festive_period: festive.period,
                recommendation: INFLATION_RECOMMENDATION.to_string(),
            });
        }
        alerts
    }

    /// Current price well above the normal-period maximum
    fn detect_baseline_spike(&self, current_price: f64, baseline: &SeasonalBaseline) -> Option<PriceAlert> {
        let rule = &self.config.spike;
        let normal_max = baseline.normal_price_range.max;
        if current_price <= normal_max * (1.0 + rule.threshold_pct / 100.0) {
            return None;
        }

        let increase = calculate_percentage_change(normal_max, current_price);
        Some(PriceAlert {
            id: generate_alert_id("baseline"),
            product_id: baseline.product_id.clone(),
            product_name: product_name(&baseline.product_id),
            price_change: PriceChange {
                from: normal_max,
                to: current_price,
                percentage_increase: increase,
            },
            alert_type: AlertType::SuspiciousSpike,
            confidence_score: rule
                .max_confidence
                .min(rule.base_confidence + increase * rule.confidence_per_pct),
            detected_at: Utc::now(),
            festive_period: None,
            recommendation: SPIKE_RECOMMENDATION.to_string(),
        })
    }

    /// Normal price, then a spike, then a "discount" that stays near the original price
    fn detect_fake_discounts(&self, sorted: &[PriceDataPoint]) -> Vec<PriceAlert> {
        let rule = &self.config.fake_discount;

        let mut alerts = Vec::new();
        for (i, triple) in sorted.windows(3).enumerate() {
            let (before, spike, discount) = (&triple[0], &triple[1], &triple[2]);

            let spiked = spike.price > before.price * rule.spike_ratio;
            let advertised = discount
                .discount_percentage
                .map(|pct| pct > rule.min_discount_pct)
                .unwrap_or(false);
            let cosmetic = discount.price >= before.price * rule.retained_ratio;
            if !(spiked && advertised && cosmetic) {
                continue;
            }

            alerts.push(PriceAlert {
                id: generate_alert_id(format!("fake_{}", i + 2)),
                product_id: discount.product_id.clone(),
                product_name: product_name(&discount.product_id),
                price_change: PriceChange {
                    from: before.price,
                    to: spike.price,
                    percentage_increase: calculate_percentage_change(before.price, spike.price),
                },
                alert_type: AlertType::FakeDiscount,
                confidence_score: rule.confidence,
                detected_at: start_of_day(spike.date),
                festive_period: None,
                recommendation: FAKE_DISCOUNT_RECOMMENDATION.to_string(),
            });
        }
        alerts
    }
}

/// Score a current price against a product's history using the default rules
pub fn detect_price_manipulation(
    current_price: f64,
    history: &[PriceDataPoint],
    baseline: &SeasonalBaseline,
) -> ManipulationAnalysis {
    PriceAnalyzer::default().detect(current_price, history, baseline)
}
