// src/report.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::price::{calculate_baseline_price, detect_price_manipulation, ManipulationAnalysis, PriceDataPoint};
use crate::shared::errors::PriceError;
use crate::shared::types::RiskLevel;
use crate::shared::utils::generate_id;

/// Score thresholds for risk tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub high_risk_score: u32,
    pub medium_risk_score: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            high_risk_score: 70,
            medium_risk_score: 40,
        }
    }
}

impl ReportConfig {
    pub fn risk_level(&self, score: u32) -> RiskLevel {
        if score >= self.high_risk_score {
            RiskLevel::High
        } else if score >= self.medium_risk_score {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceReport {
    pub report_id: String,
    pub product_id: String,
    pub summary: String,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,

    pub score: u32,
    pub alert_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl PriceReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Turns a manipulation score into a risk tier and canned advice
pub struct ReportGenerator {
    config: ReportConfig,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn recommendations(&self, risk_level: RiskLevel, alert_count: usize) -> Vec<String> {
        let mut recommendations = Vec::new();
        if alert_count > 0 {
            recommendations.push("Monitor pricing patterns closely".to_string());
            recommendations.push("Investigate recent price changes".to_string());
        }
        if risk_level == RiskLevel::High {
            recommendations.push("Consider regulatory investigation".to_string());
            recommendations.push("Alert consumers about potential manipulation".to_string());
        }
        recommendations
    }

    pub fn generate(&self, product_id: &str, analysis: &ManipulationAnalysis) -> PriceReport {
        let risk_level = self.config.risk_level(analysis.score);
        let alert_count = analysis.alerts.len();

        PriceReport {
            report_id: generate_id(),
            product_id: product_id.to_string(),
            summary: format!(
                "Product {} has a manipulation risk score of {}/100 with {} active alerts.",
                product_id, analysis.score, alert_count
            ),
            risk_level,
            recommendations: self.recommendations(risk_level, alert_count),
            score: analysis.score,
            alert_count,
            generated_at: Utc::now(),
        }
    }
}

/// Baseline, scoring and report in one call using the default rules
pub fn generate_price_report(
    product_id: &str,
    current_price: f64,
    history: &[PriceDataPoint],
) -> Result<PriceReport, PriceError> {
    let baseline = calculate_baseline_price(history)?;
    let analysis = detect_price_manipulation(current_price, history, &baseline);
    Ok(ReportGenerator::default().generate(product_id, &analysis))
}
