//! CLI commands and handlers
use crate::application::services::PriceAnalysisService;
use crate::domain::price::ProductHistory;
use crate::domain::verification::{
    calculate_trust_score, generate_verification_report, validate_consumer_submission, validate_seller_submission,
    ConsumerSubmission, SellerSubmission, VerificationResult,
};
use crate::infrastructure::file_history::read_json_file;
use crate::infrastructure::FileHistorySource;
use crate::shared::errors::{AppError, PriceError};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "compliancecheck")]
#[command(version, about = "Price manipulation and verification analyzer for e-commerce listings")]
pub struct Cli {
    /// Path to config file (defaults to ./Config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level filter (overrides config), e.g. "debug" or "compliancecheck=trace"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SubmissionKind {
    Consumer,
    Seller,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the seasonal baseline of a product history
    Baseline {
        /// Product history JSON file
        #[arg(long)]
        history: PathBuf,
    },

    /// Manipulation risk report for one product
    Report {
        /// Product history JSON file
        #[arg(long)]
        history: PathBuf,

        /// Current price (defaults to the file's current_price, then the latest observation)
        #[arg(long)]
        current_price: Option<f64>,
    },

    /// Full price analysis for one product
    Analyze {
        /// Product history JSON file
        #[arg(long)]
        history: PathBuf,

        /// Current price (defaults to the file's current_price, then the latest observation)
        #[arg(long)]
        current_price: Option<f64>,

        /// Date the analysis is made for (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Report every product history in a directory
    Scan {
        /// Directory of <product_id>.json files
        #[arg(long)]
        dir: PathBuf,
    },

    /// Check whether a date falls in a festive period
    Festive {
        /// Date to check (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Validate a verification submission
    Validate {
        #[arg(long, value_enum)]
        kind: SubmissionKind,

        /// Submission JSON file
        #[arg(long)]
        file: PathBuf,
    },

    /// Summarize a verification result
    VerifyReport {
        /// Verification result JSON file
        #[arg(long)]
        file: PathBuf,
    },

    /// Trust score over a verification history
    Trust {
        /// JSON array of verification results
        #[arg(long)]
        file: PathBuf,
    },
}

pub struct CommandExecutor {
    service: PriceAnalysisService,
}

impl CommandExecutor {
    pub fn new(service: PriceAnalysisService) -> Self {
        Self { service }
    }

    pub async fn execute(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Baseline { history } => {
                let product = load_product(&history).await?;
                print_json(&self.service.baseline(&product.history)?)
            }
            Commands::Report { history, current_price } => {
                let product = load_product(&history).await?;
                let current_price = resolve_current_price(&product, current_price)?;
                let report = self.service.report(&product.product_id, current_price, &product.history)?;
                print_json(&report)
            }
            Commands::Analyze {
                history,
                current_price,
                as_of,
            } => {
                let product = load_product(&history).await?;
                let current_price = resolve_current_price(&product, current_price)?;
                let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
                let result = self
                    .service
                    .analyze_product(&product.product_id, current_price, &product.history, as_of)?;
                print_json(&result)
            }
            Commands::Scan { dir } => {
                let source = FileHistorySource::new(dir);
                let reports = self.service.scan(&source).await?;
                print_json(&reports)
            }
            Commands::Festive { date } => {
                let date = date.unwrap_or_else(|| Utc::now().date_naive());
                print_json(&self.service.calendar().detect(date))
            }
            Commands::Validate { kind, file } => {
                let outcome = match kind {
                    SubmissionKind::Consumer => {
                        let submission: ConsumerSubmission = read_json_file(&file).await?;
                        validate_consumer_submission(&submission)
                    }
                    SubmissionKind::Seller => {
                        let submission: SellerSubmission = read_json_file(&file).await?;
                        validate_seller_submission(&submission)
                    }
                };
                info!("Submission valid: {}, {} errors", outcome.is_valid, outcome.errors.len());
                print_json(&outcome)
            }
            Commands::VerifyReport { file } => {
                let result: VerificationResult = read_json_file(&file).await?;
                print_json(&generate_verification_report(&result))
            }
            Commands::Trust { file } => {
                let history: Vec<VerificationResult> = read_json_file(&file).await?;
                print_json(&calculate_trust_score(&history))
            }
        }
    }
}

async fn load_product(path: &Path) -> Result<ProductHistory, AppError> {
    let product: ProductHistory = read_json_file(path).await?;
    info!(
        "Loaded {} price points for product {} from {}",
        product.history.len(),
        product.product_id,
        path.display()
    );
    Ok(product)
}

fn resolve_current_price(product: &ProductHistory, cli_price: Option<f64>) -> Result<f64, AppError> {
    cli_price
        .or_else(|| product.effective_current_price())
        .ok_or(AppError::Price(PriceError::NoHistoricalData))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
