//! Verification report generation

use super::{VerificationResult, VerificationStatus};
use crate::shared::types::RiskLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub summary: String,
    pub risk_level: RiskLevel,
    pub next_actions: Vec<String>,
}

const MEDIUM_RISK_CONFIDENCE: f64 = 70.0;

pub fn generate_verification_report(result: &VerificationResult) -> VerificationReport {
    let risk_level = if result.overall_status == VerificationStatus::Failed {
        RiskLevel::High
    } else if result.confidence_score < MEDIUM_RISK_CONFIDENCE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let checks = result.checks_performed.all();
    let passed = checks.iter().filter(|c| c.passed).count();

    let next_actions: &[&str] = match risk_level {
        RiskLevel::High => &[
            "Immediate review required",
            "Contact seller for clarification",
            "Consider dispute resolution",
        ],
        RiskLevel::Medium => &["Monitor product closely", "Verify additional documentation"],
        RiskLevel::Low => &["Product cleared for use/sale", "Maintain documentation for records"],
    };

    VerificationReport {
        summary: format!(
            "Verification completed with {}% confidence. {}/{} checks passed.",
            result.confidence_score,
            passed,
            checks.len()
        ),
        risk_level,
        next_actions: next_actions.iter().map(|s| s.to_string()).collect(),
    }
}
