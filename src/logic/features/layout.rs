//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema the classifier was trained on**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//! 4. Change a feature's kind → increment FEATURE_VERSION
//!
//! Column names are the claims file headers, typos included
//! (`Acccident_State`, `Acccident_City`).

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FIELD NAMES
// ============================================================================

/// Column names referenced directly by the preparer and the report
pub mod field {
    pub const CLAIM_ID: &str = "Claim_ID";

    pub const TOTAL_CLAIM: &str = "Total_Claim";
    pub const VEHICLE_COST: &str = "Vehicle_Cost";
    pub const INJURY_CLAIM: &str = "Injury_Claim";
    pub const PROPERTY_CLAIM: &str = "Property_Claim";
    pub const AUTO_YEAR: &str = "Auto_Year";
    pub const AUTO_MAKE: &str = "Auto_Make";
    pub const AUTO_MODEL: &str = "Auto_Model";
    pub const POLICY_STATE: &str = "Policy_State";
    pub const ACCIDENT_STATE: &str = "Acccident_State";
    pub const ACCIDENT_CITY: &str = "Acccident_City";
    pub const ACCIDENT_TYPE: &str = "Accident_Type";

    pub const VEHICLE_AGE: &str = "Vehicle_Age";
    pub const VEHICLE_TO_TOTAL_RATIO: &str = "Vehicle_to_Total_Ratio";
    pub const INJURY_TO_TOTAL_RATIO: &str = "Injury_to_Total_Ratio";
    pub const PROPERTY_TO_TOTAL_RATIO: &str = "Property_to_Total_Ratio";

    /// Computed alongside the vector but not part of FEATURE_LAYOUT
    pub const STATE_MISMATCH: &str = "State_Mismatch";
}

// ============================================================================
// FEATURE KIND
// ============================================================================

/// Role of a feature in the schema. Decides the default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Defaults to 0
    Numeric,
    /// Defaults to the "missing" sentinel
    Categorical,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Numeric => "numeric",
            FeatureKind::Categorical => "categorical",
        }
    }
}

/// Sentinel for absent categorical values
pub const MISSING_CATEGORY: &str = "missing";

/// One entry of the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub kind: FeatureKind,
}

impl FeatureSpec {
    const fn numeric(name: &'static str) -> Self {
        Self { name, kind: FeatureKind::Numeric }
    }

    const fn categorical(name: &'static str) -> Self {
        Self { name, kind: FeatureKind::Categorical }
    }
}

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Features in exact order the classifier expects them
/// This is the SINGLE SOURCE OF TRUTH for feature layout
pub const FEATURE_LAYOUT: &[FeatureSpec] = &[
    // === Customer & policy (0-7) ===
    FeatureSpec::numeric("Customer_Life_Value1"),      // 0
    FeatureSpec::numeric("Age_Insured"),               // 1
    FeatureSpec::numeric("Policy_Ded"),                // 2
    FeatureSpec::numeric("Policy_Premium"),            // 3
    FeatureSpec::numeric("Umbrella_Limit"),            // 4
    FeatureSpec::numeric("Insured_Zip"),               // 5
    FeatureSpec::numeric("Capital_Gains"),             // 6
    FeatureSpec::numeric("Capital_Loss"),              // 7

    // === Accident (8-11) ===
    FeatureSpec::numeric("Accident_Hour"),             // 8
    FeatureSpec::numeric("Num_of_Vehicles_Involved"),  // 9
    FeatureSpec::numeric("Bodily_Injuries"),           // 10
    FeatureSpec::numeric("Witnesses"),                 // 11

    // === Vehicle (12-17) ===
    FeatureSpec::numeric("Auto_Year"),                 // 12
    FeatureSpec::numeric("Vehicle_Cost"),              // 13
    FeatureSpec::numeric("Annual_Mileage"),            // 14
    FeatureSpec::numeric("DiffIN_Mileage"),            // 15
    FeatureSpec::numeric("Low_Mileage_Discount"),      // 16
    FeatureSpec::numeric("Commute_Discount"),          // 17

    // === Claim amounts (18-21) ===
    FeatureSpec::numeric("Total_Claim"),               // 18
    FeatureSpec::numeric("Injury_Claim"),              // 19
    FeatureSpec::numeric("Property_Claim"),            // 20
    FeatureSpec::numeric("Vehicle_Claim"),             // 21

    // === Derived (22-25) ===
    FeatureSpec::numeric("Vehicle_Age"),               // 22: reference year - Auto_Year
    FeatureSpec::numeric("Injury_to_Total_Ratio"),     // 23
    FeatureSpec::numeric("Property_to_Total_Ratio"),   // 24
    FeatureSpec::numeric("Vehicle_to_Total_Ratio"),    // 25

    // === Categorical (26-46) ===
    FeatureSpec::categorical("Policy_State"),          // 26
    FeatureSpec::categorical("Policy_BI"),             // 27
    FeatureSpec::categorical("Gender"),                // 28
    FeatureSpec::categorical("Education"),             // 29
    FeatureSpec::categorical("Occupation"),            // 30
    FeatureSpec::categorical("Hobbies"),               // 31
    FeatureSpec::categorical("Insured_Relationship"),  // 32
    FeatureSpec::categorical("Garage_Location"),       // 33
    FeatureSpec::categorical("Accident_Date"),         // 34
    FeatureSpec::categorical("Accident_Type"),         // 35
    FeatureSpec::categorical("Collision_Type"),        // 36
    FeatureSpec::categorical("Accident_Severity"),     // 37
    FeatureSpec::categorical("authorities_contacted"), // 38
    FeatureSpec::categorical("Acccident_State"),       // 39
    FeatureSpec::categorical("Acccident_City"),        // 40
    FeatureSpec::categorical("Accident_Location"),     // 41
    FeatureSpec::categorical("Property_Damage"),       // 42
    FeatureSpec::categorical("Police_Report"),         // 43
    FeatureSpec::categorical("Auto_Make"),             // 44
    FeatureSpec::categorical("Auto_Model"),            // 45
    FeatureSpec::categorical("Vehicle_Color"),         // 46
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 47;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect model/layout mismatches when a classifier is loaded
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for spec in FEATURE_LAYOUT {
        hasher.update(spec.name.as_bytes());
        hasher.update(&[0]); // Separator
        hasher.update(spec.kind.as_str().as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: feature_names().map(str::to_string).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a model declares a layout other than the current one
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})")]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that a declared layout matches the current one
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|spec| spec.name == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).map(|spec| spec.name)
}

/// Get feature kind by name
pub fn feature_kind(name: &str) -> Option<FeatureKind> {
    FEATURE_LAYOUT.iter().find(|spec| spec.name == name).map(|spec| spec.kind)
}

/// Feature names in layout order
pub fn feature_names() -> impl DoubleEndedIterator<Item = &'static str> + ExactSizeIterator {
    FEATURE_LAYOUT.iter().map(|spec| spec.name)
}

// ============================================================================
// TESTS
// ============================================================================
