//! Submission validation

use super::{is_blank, ConsumerSubmission, SellerSubmission, VerificationType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

pub fn validate_consumer_submission(data: &ConsumerSubmission) -> ValidationOutcome {
    let mut errors = Vec::new();

    if is_blank(&data.product_id) {
        errors.push("Product ID is required".to_string());
    }

    match data.verification_type {
        None => errors.push("Verification type must be selected".to_string()),
        Some(VerificationType::PostDelivery) if data.delivery_details.is_none() => {
            errors.push("Delivery details are required for post-delivery verification".to_string());
        }
        Some(VerificationType::PrePurchase)
            if data.purchase_details.as_ref().map_or(true, |p| is_blank(&p.seller_name)) =>
        {
            errors.push("Seller information is required for pre-purchase verification".to_string());
        }
        _ => {}
    }

    ValidationOutcome::from_errors(errors)
}

pub fn validate_seller_submission(data: &SellerSubmission) -> ValidationOutcome {
    let mut errors = Vec::new();

    if is_blank(&data.product_id) {
        errors.push("Product ID is required".to_string());
    }

    if data.verification_type == Some(VerificationType::Batch) {
        match &data.batch_details {
            None => errors.push("Batch details are required for batch verification".to_string()),
            Some(batch) => {
                if is_blank(&batch.batch_id) {
                    errors.push("Batch ID is required".to_string());
                }
                if batch.quantity.map_or(true, |q| q <= 0) {
                    errors.push("Valid quantity is required".to_string());
                }
                if batch.manufacturing_date.is_none() {
                    errors.push("Manufacturing date is required".to_string());
                }
            }
        }
    }

    ValidationOutcome::from_errors(errors)
}
