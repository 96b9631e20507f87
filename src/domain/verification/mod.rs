//! Verification domain - dual-side (consumer/seller) product verification

mod trust_score;
mod validation;
mod verification_report;

pub use trust_score::{calculate_trust_score, TrustFactor, TrustLevel, TrustScore};
pub use validation::{validate_consumer_submission, validate_seller_submission, ValidationOutcome};
pub use verification_report::{generate_verification_report, VerificationReport};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationType {
    PrePurchase,
    PostDelivery,
    Authenticity,
    Batch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDetails {
    pub seller_name: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub price_paid: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub delivery_date: Option<NaiveDate>,
    pub condition_on_delivery: Option<String>,
}

/// Consumer-side submission as received from a form; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerSubmission {
    pub product_id: Option<String>,
    pub verification_type: Option<VerificationType>,
    pub purchase_details: Option<PurchaseDetails>,
    pub delivery_details: Option<DeliveryDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchDetails {
    pub batch_id: Option<String>,
    pub quantity: Option<i64>,
    pub manufacturing_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
}

/// Seller-side submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SellerSubmission {
    pub product_id: Option<String>,
    pub verification_type: Option<VerificationType>,
    pub batch_details: Option<BatchDetails>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Failed,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub passed: bool,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecksPerformed {
    pub authenticity: CheckOutcome,
    pub compliance: CheckOutcome,
    pub quality: CheckOutcome,
}

impl ChecksPerformed {
    pub fn all(&self) -> [&CheckOutcome; 3] {
        [&self.authenticity, &self.compliance, &self.quality]
    }
}

/// Outcome of a verification run, as returned by the verification backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verification_id: String,
    pub overall_status: VerificationStatus,
    pub confidence_score: f64,
    pub checks_performed: ChecksPerformed,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub dispute_raised: bool,
}

/// Blank strings count as missing
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).map_or(true, str::is_empty)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_deserialization() {
        let json = r#"{
            "product_id": "SKU-9",
            "verification_type": "post_delivery",
            "delivery_details": { "delivery_date": "2024-05-02", "condition_on_delivery": "sealed" }
        }"#;
        let submission: ConsumerSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.verification_type, Some(VerificationType::PostDelivery));
        assert!(submission.purchase_details.is_none());
        assert_eq!(
            submission.delivery_details.unwrap().delivery_date,
            NaiveDate::from_ymd_opt(2024, 5, 2)
        );
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some("  ".to_string())));
        assert!(!is_blank(&Some("SKU".to_string())));
    }
}
