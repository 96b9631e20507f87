//! Seller trust score over a verification history

use super::{VerificationResult, VerificationStatus};
use serde::{Deserialize, Serialize};

/// Placeholder until document completeness is scored per submission
const DOCUMENTATION_QUALITY_SCORE: f64 = 85.0;
const NEUTRAL_TRUST_SCORE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl TrustLevel {
    fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            TrustLevel::Excellent
        } else if score >= 75.0 {
            TrustLevel::Good
        } else if score >= 60.0 {
            TrustLevel::Fair
        } else {
            TrustLevel::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustFactor {
    pub factor: String,
    pub weight: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustScore {
    pub score: u32,
    pub level: TrustLevel,
    pub factors: Vec<TrustFactor>,
}

fn share_pct(history: &[VerificationResult], pred: impl Fn(&VerificationResult) -> bool) -> f64 {
    history.iter().filter(|&v| pred(v)).count() as f64 / history.len() as f64 * 100.0
}

pub fn calculate_trust_score(history: &[VerificationResult]) -> TrustScore {
    if history.is_empty() {
        return TrustScore {
            score: NEUTRAL_TRUST_SCORE,
            level: TrustLevel::Fair,
            factors: Vec::new(),
        };
    }

    let average_confidence = history.iter().map(|v| v.confidence_score).sum::<f64>() / history.len() as f64;

    let factors = vec![
        TrustFactor {
            factor: "Verification Success Rate".to_string(),
            weight: 0.4,
            score: share_pct(history, |v| v.overall_status == VerificationStatus::Verified),
        },
        TrustFactor {
            factor: "Average Confidence Score".to_string(),
            weight: 0.3,
            score: average_confidence,
        },
        TrustFactor {
            factor: "Dispute Resolution".to_string(),
            weight: 0.2,
            score: share_pct(history, |v| !v.dispute_raised),
        },
        TrustFactor {
            factor: "Documentation Quality".to_string(),
            weight: 0.1,
            score: DOCUMENTATION_QUALITY_SCORE,
        },
    ];

    let total: f64 = factors.iter().map(|f| f.score * f.weight).sum();

    TrustScore {
        score: total.round().max(0.0) as u32,
        level: TrustLevel::from_score(total),
        factors,
    }
}
