//! Application services and use cases

use crate::domain::price::{
    BaselineCalculator, FestiveCalendar, ManipulationAnalysis, PriceAnalysisResult, PriceAnalyzer, PriceDataPoint,
    PriceHistorySource, SeasonalAnalysis, SeasonalBaseline,
};
use crate::report::{PriceReport, ReportGenerator};
use crate::shared::config::AnalyzerConfig;
use crate::shared::errors::{AppError, HistoryError, PriceError};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::borrow::Cow;
use tracing::{info, warn};

/// Application service for price manipulation analysis
pub struct PriceAnalysisService {
    config: AnalyzerConfig,
    baseline: BaselineCalculator,
    analyzer: PriceAnalyzer,
    reporter: ReportGenerator,
}

impl Default for PriceAnalysisService {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl PriceAnalysisService {
    pub fn new(config: AnalyzerConfig) -> Self {
        let calendar = FestiveCalendar::new(config.festive_periods.clone());
        Self {
            analyzer: PriceAnalyzer::new(config.detection.clone(), calendar),
            reporter: ReportGenerator::new(config.report.clone()),
            baseline: BaselineCalculator,
            config,
        }
    }

    pub fn calendar(&self) -> &FestiveCalendar {
        self.analyzer.calendar()
    }

    fn prepare<'a>(&self, history: &'a [PriceDataPoint]) -> Cow<'a, [PriceDataPoint]> {
        if self.config.infer_festive_flags {
            Cow::Owned(self.calendar().annotate(history))
        } else {
            Cow::Borrowed(history)
        }
    }

    pub fn baseline(&self, history: &[PriceDataPoint]) -> Result<SeasonalBaseline, PriceError> {
        self.baseline.calculate(&self.prepare(history))
    }

    fn score(
        &self,
        current_price: f64,
        history: &[PriceDataPoint],
    ) -> Result<(SeasonalBaseline, ManipulationAnalysis), PriceError> {
        let history = self.prepare(history);
        let baseline = self.baseline.calculate(&history)?;
        let analysis = self.analyzer.detect(current_price, &history, &baseline);
        Ok((baseline, analysis))
    }

    pub fn report(
        &self,
        product_id: &str,
        current_price: f64,
        history: &[PriceDataPoint],
    ) -> Result<PriceReport, PriceError> {
        let (_, analysis) = self.score(current_price, history)?;
        let report = self.reporter.generate(product_id, &analysis);
        info!(
            "Product {}: score {}/100, risk {}, {} alerts",
            product_id, report.score, report.risk_level, report.alert_count
        );
        Ok(report)
    }

    /// Full analysis of a product as of a given date
    pub fn analyze_product(
        &self,
        product_id: &str,
        current_price: f64,
        history: &[PriceDataPoint],
        as_of: NaiveDate,
    ) -> Result<PriceAnalysisResult, PriceError> {
        let (baseline, analysis) = self.score(current_price, history)?;

        let is_festive_period = self.calendar().is_festive(as_of);
        let expected_price_range = if is_festive_period {
            baseline.festive_baseline
        } else {
            baseline.normal_price_range
        };

        Ok(PriceAnalysisResult {
            product_id: product_id.to_string(),
            current_price,
            baseline_price: baseline.normal_average,
            price_manipulation_score: analysis.score,
            seasonal_analysis: SeasonalAnalysis {
                is_festive_period,
                expected_price_range,
                within_expected_range: expected_price_range.contains(current_price),
                anomaly_detected: !analysis.alerts.is_empty(),
            },
            alerts: analysis.alerts,
            historical_data: self.prepare(history).into_owned(),
        })
    }

    async fn report_from_source(
        &self,
        source: &dyn PriceHistorySource,
        product_id: &str,
    ) -> Result<PriceReport, AppError> {
        let product = source.load(product_id).await?;
        let current_price = product
            .effective_current_price()
            .ok_or(PriceError::NoHistoricalData)?;
        Ok(self.report(&product.product_id, current_price, &product.history)?)
    }

    /// Report every product in a source, highest score first.
    /// Products that fail to load or score are logged and skipped.
    pub async fn scan(&self, source: &dyn PriceHistorySource) -> Result<Vec<PriceReport>, HistoryError> {
        let products = source.list_products().await?;
        info!("Scanning {} products", products.len());

        let results: Vec<_> = stream::iter(products.iter().map(|id| self.report_from_source(source, id)))
            .buffered(self.config.scan_concurrency)
            .collect()
            .await;

        let mut reports = Vec::with_capacity(results.len());
        for (product_id, result) in products.iter().zip(results) {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => warn!("Skipping product {}: {}", product_id, e),
            }
        }

        reports.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.product_id.cmp(&b.product_id)));
        info!("Scan complete: {}/{} products reported", reports.len(), products.len());
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::{AlertType, ProductHistory};
    use crate::infrastructure::FileHistorySource;
    use crate::shared::types::{PriceRange, RiskLevel};
    use std::fs;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn point(product_id: &str, day: &str, price: f64) -> PriceDataPoint {
        PriceDataPoint::new(product_id, date(day), price, "web")
    }

    fn festive_history() -> Vec<PriceDataPoint> {
        vec![
            point("SKU-1", "2024-07-01", 1000.0),
            point("SKU-1", "2024-07-15", 1100.0),
            point("SKU-1", "2024-10-20", 1400.0).festive(),
            point("SKU-1", "2024-10-25", 1600.0).festive(),
        ]
    }

    #[test]
    fn test_analyze_product_outside_festive_period() {
        let service = PriceAnalysisService::default();
        let result = service
            .analyze_product("SKU-1", 1050.0, &festive_history(), date("2024-07-20"))
            .unwrap();

        assert_eq!(result.baseline_price, 1050.0);
        assert!(!result.seasonal_analysis.is_festive_period);
        assert_eq!(result.seasonal_analysis.expected_price_range, PriceRange::new(1000.0, 1100.0));
        assert!(result.seasonal_analysis.within_expected_range);
        assert!(!result.seasonal_analysis.anomaly_detected);
        assert_eq!(result.price_manipulation_score, 0);
        assert_eq!(result.historical_data.len(), 4);
    }

    #[test]
    fn test_analyze_product_outside_expected_range() {
        let service = PriceAnalysisService::default();
        let result = service
            .analyze_product("SKU-1", 1300.0, &festive_history(), date("2024-07-20"))
            .unwrap();

        // above the normal range but below the spike threshold
        assert!(!result.seasonal_analysis.within_expected_range);
        assert!(!result.seasonal_analysis.anomaly_detected);
        assert_eq!(result.price_manipulation_score, 0);
    }

    #[test]
    fn test_analyze_product_during_festive_period() {
        let service = PriceAnalysisService::default();
        let result = service
            .analyze_product("SKU-1", 1600.0, &festive_history(), date("2024-10-28"))
            .unwrap();

        assert!(result.seasonal_analysis.is_festive_period);
        assert_eq!(result.seasonal_analysis.expected_price_range, PriceRange::new(1400.0, 1600.0));
        assert!(result.seasonal_analysis.within_expected_range);
        assert!(result.seasonal_analysis.anomaly_detected);
        assert!(result
            .alerts
            .iter()
            .any(|a| a.alert_type == AlertType::SuspiciousSpike));
    }

    #[test]
    fn test_inferred_festive_flags() {
        let config = AnalyzerConfig {
            infer_festive_flags: true,
            ..Default::default()
        };
        let service = PriceAnalysisService::new(config);
        let history = vec![
            point("SKU-1", "2024-07-01", 100.0),
            point("SKU-1", "2024-11-01", 150.0),
        ];

        let baseline = service.baseline(&history).unwrap();
        assert_eq!(baseline.normal_price_range, PriceRange::new(100.0, 100.0));
        assert_eq!(baseline.festive_baseline, PriceRange::new(150.0, 150.0));
        assert_eq!(baseline.average_seasonal_increase, 50.0);

        let plain = PriceAnalysisService::default().baseline(&history).unwrap();
        assert_eq!(plain.average_seasonal_increase, 0.0);
    }

    #[test]
    fn test_report_empty_history() {
        let service = PriceAnalysisService::default();
        assert!(matches!(service.report("SKU-1", 10.0, &[]), Err(PriceError::NoHistoricalData)));
    }

    fn write_product(dir: &std::path::Path, product: &ProductHistory) {
        let path = dir.join(format!("{}.json", product.product_id));
        fs::write(path, serde_json::to_string(product).unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_scan_orders_by_score_and_skips_failures() {
        let dir = tempfile::tempdir().unwrap();

        write_product(
            dir.path(),
            &ProductHistory {
                product_id: "calm".to_string(),
                current_price: None,
                history: vec![point("calm", "2024-07-01", 100.0), point("calm", "2024-07-02", 101.0)],
            },
        );
        write_product(
            dir.path(),
            &ProductHistory {
                product_id: "spiky".to_string(),
                current_price: Some(500.0),
                history: vec![point("spiky", "2024-07-01", 100.0)],
            },
        );
        write_product(
            dir.path(),
            &ProductHistory {
                product_id: "empty".to_string(),
                current_price: Some(10.0),
                history: Vec::new(),
            },
        );
        fs::write(dir.path().join("broken.json"), "[").unwrap();

        let source = FileHistorySource::new(dir.path());
        let reports = PriceAnalysisService::default().scan(&source).await.unwrap();

        let ids: Vec<&str> = reports.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["spiky", "calm"]);
        assert_eq!(reports[0].score, 25);
        assert_eq!(reports[0].risk_level, RiskLevel::Low);
        assert_eq!(reports[1].score, 0);
    }

    #[tokio::test]
    async fn test_scan_with_single_slot_reports_every_product() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            let id = format!("sku-{}", i);
            write_product(
                dir.path(),
                &ProductHistory {
                    product_id: id.clone(),
                    current_price: Some(100.0 + 100.0 * i as f64),
                    history: vec![point(&id, "2024-07-01", 100.0)],
                },
            );
        }

        let config = AnalyzerConfig {
            scan_concurrency: 1,
            ..Default::default()
        };
        let source = FileHistorySource::new(dir.path());
        let reports = PriceAnalysisService::new(config).scan(&source).await.unwrap();

        let ids: Vec<&str> = reports.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["sku-1", "sku-2", "sku-3", "sku-4", "sku-0"]);
        assert_eq!(reports[0].score, 25);
        assert_eq!(reports[4].score, 0);
    }
}
