use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::price::{default_festive_periods, FestivePeriod, PriceDetectionConfig};
use crate::report::ReportConfig;
use crate::shared::errors::AppError;

pub const DEFAULT_CONFIG_PATH: &str = "Config.toml";

/// Analyzer configuration, every section optional
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub log_level: String,
    /// Fill missing festive flags on history points from the calendar
    pub infer_festive_flags: bool,
    /// Products loaded at once during a batch scan
    pub scan_concurrency: usize,
    pub detection: PriceDetectionConfig,
    pub report: ReportConfig,
    pub festive_periods: Vec<FestivePeriod>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            infer_festive_flags: false,
            scan_concurrency: 16,
            detection: PriceDetectionConfig::default(),
            report: ReportConfig::default(),
            festive_periods: default_festive_periods(),
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.scan_concurrency == 0 {
            return Err(AppError::ConfigError("scan_concurrency must be positive".to_string()));
        }
        if self.detection.recent_window < 2 {
            return Err(AppError::ConfigError(format!(
                "detection.recent_window must be at least 2, got {}",
                self.detection.recent_window
            )));
        }
        if self.detection.near_festive_days < 0 {
            return Err(AppError::ConfigError("detection.near_festive_days must not be negative".to_string()));
        }
        if self.detection.max_score == 0 {
            return Err(AppError::ConfigError("detection.max_score must be positive".to_string()));
        }
        let rule_scores = [
            ("inflation", self.detection.inflation.score),
            ("spike", self.detection.spike.score),
            ("fake_discount", self.detection.fake_discount.score),
        ];
        for (rule, score) in rule_scores {
            if score > self.detection.max_score {
                return Err(AppError::ConfigError(format!(
                    "detection.{}.score ({}) exceeds detection.max_score ({})",
                    rule, score, self.detection.max_score
                )));
            }
        }
        if self.report.medium_risk_score > self.report.high_risk_score {
            return Err(AppError::ConfigError(format!(
                "report.medium_risk_score ({}) exceeds report.high_risk_score ({})",
                self.report.medium_risk_score, self.report.high_risk_score
            )));
        }
        Ok(())
    }
}

/// Reads and validates `AnalyzerConfig` from TOML
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn parse(content: &str) -> Result<AnalyzerConfig, AppError> {
        let config: AnalyzerConfig = toml::from_str(content)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AnalyzerConfig, AppError> {
        let config_content = fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::ConfigError(format!("Failed to read config file: {}", e)))?;
        Self::parse(&config_content)
    }

    /// Explicit path must exist; otherwise `Config.toml` is used when present
    pub fn load_or_default(path: Option<&Path>) -> Result<AnalyzerConfig, AppError> {
        match path {
            Some(path) => Self::load_config(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load_config(DEFAULT_CONFIG_PATH),
            None => Ok(AnalyzerConfig::default()),
        }
    }
}
