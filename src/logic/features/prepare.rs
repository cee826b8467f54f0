//! Claim Preparation - claim record → classifier-ready feature row
//!
//! Same derived features as at training time:
//! 1. claim-amount ratios against `Total_Claim` (0 when the total is not positive)
//! 2. `Vehicle_Age` from the reference year
//! 3. `State_Mismatch` (kept for parity with training, not sent to the model)

use chrono::Datelike;

use super::layout::field;
use super::vector::{FeatureError, FeatureExtractor, FeatureVector};
use crate::logic::records::ClaimRecord;

/// Build the feature row for one claim.
///
/// Pure: the same record and year always give the same vector.
pub fn prepare_claim_data(record: &ClaimRecord, reference_year: i32) -> Result<FeatureVector, FeatureError> {
    let mut vector = FeatureVector::new();
    vector.apply_record(record)?;

    let vehicle_age = VehicleAge { reference_year };
    let steps: [&dyn FeatureExtractor; 3] = [&ClaimRatios, &vehicle_age, &StateMismatch];
    for step in steps {
        step.extract(&mut vector);
    }

    Ok(vector)
}

/// Calendar year used for `Vehicle_Age` in production
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

// ============================================================================
// DERIVED FEATURES
// ============================================================================

/// Vehicle / injury / property share of the total claim
pub struct ClaimRatios;

impl FeatureExtractor for ClaimRatios {
    fn extract(&self, vector: &mut FeatureVector) {
        let total = vector.number(field::TOTAL_CLAIM).unwrap_or(0.0);

        let pairs = [
            (field::VEHICLE_TO_TOTAL_RATIO, field::VEHICLE_COST),
            (field::INJURY_TO_TOTAL_RATIO, field::INJURY_CLAIM),
            (field::PROPERTY_TO_TOTAL_RATIO, field::PROPERTY_CLAIM),
        ];

        for (target, part) in pairs {
            let ratio = if total > 0.0 {
                vector.number(part).unwrap_or(0.0) / total
            } else {
                0.0
            };
            vector.set_number(target, ratio);
        }
    }
}

/// Years since the model year; a missing `Auto_Year` counts as 0
pub struct VehicleAge {
    pub reference_year: i32,
}

impl FeatureExtractor for VehicleAge {
    fn extract(&self, vector: &mut FeatureVector) {
        let auto_year = vector.number(field::AUTO_YEAR).unwrap_or(0.0);
        vector.set_number(field::VEHICLE_AGE, f64::from(self.reference_year) - auto_year);
    }
}

/// Policy state differs from accident state
pub struct StateMismatch;

impl FeatureExtractor for StateMismatch {
    fn extract(&self, vector: &mut FeatureVector) {
        let mismatch = vector.text(field::POLICY_STATE) != vector.text(field::ACCIDENT_STATE);
        vector.set_state_mismatch(mismatch);
    }
}

// ============================================================================
// TESTS
// ============================================================================
