//! ComplianceCheck - price manipulation and verification analyzer
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;
pub mod report;

// Re-export main types for convenience
pub use domain::price::{
    calculate_baseline_price, detect_price_manipulation, FestiveCalendar, PriceAlert, PriceAnalyzer,
    PriceDataPoint, SeasonalBaseline,
};
pub use report::{generate_price_report, PriceReport};
pub use application::PriceAnalysisService;
