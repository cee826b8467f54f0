//! Integration Tests for Feature Preparation
//!
//! Properties that must hold for any claim record.

#[cfg(test)]
mod integration_tests {
    use std::collections::HashSet;

    use crate::logic::features::{
        layout::{FeatureKind, FEATURE_LAYOUT, MISSING_CATEGORY},
        prepare_claim_data, FEATURE_COUNT,
    };
    use crate::logic::records::{ClaimRecord, ClaimStore, FieldValue};

    fn full_record() -> ClaimRecord {
        ClaimRecord::new("AB00015")
            .with_field("Claim_ID", "AB00015")
            .with_field("Customer_Life_Value1", 12500.0)
            .with_field("Age_Insured", 41.0)
            .with_field("Policy_State", "OH")
            .with_field("Policy_BI", "250/500")
            .with_field("Gender", "MALE")
            .with_field("Auto_Year", 2012.0)
            .with_field("Auto_Make", "Saab")
            .with_field("Auto_Model", "92x")
            .with_field("Vehicle_Cost", 18000.0)
            .with_field("Total_Claim", 60000.0)
            .with_field("Injury_Claim", 6000.0)
            .with_field("Property_Claim", 12000.0)
            .with_field("Vehicle_Claim", 42000.0)
            .with_field("Acccident_State", "SC")
            .with_field("Acccident_City", "Columbus")
            .with_field("Accident_Type", "Multi-vehicle Collision")
    }

    /// Record without any optional field → every key present with its default
    #[test]
    fn test_empty_record_gets_all_defaults() {
        let vector = prepare_claim_data(&ClaimRecord::new("X"), 2025).unwrap();

        let derived: HashSet<&str> = [
            "Vehicle_Age",
            "Vehicle_to_Total_Ratio",
            "Injury_to_Total_Ratio",
            "Property_to_Total_Ratio",
        ]
        .into_iter()
        .collect();

        for (spec, value) in FEATURE_LAYOUT.iter().zip(vector.values()) {
            if derived.contains(spec.name) {
                continue;
            }
            match spec.kind {
                FeatureKind::Numeric => assert_eq!(value, &FieldValue::Number(0.0), "{}", spec.name),
                FeatureKind::Categorical => {
                    assert_eq!(value, &FieldValue::Text(MISSING_CATEGORY.to_string()), "{}", spec.name)
                }
            }
        }

        assert_eq!(vector.number("Vehicle_to_Total_Ratio"), Some(0.0));
        assert_eq!(vector.number("Injury_to_Total_Ratio"), Some(0.0));
        assert_eq!(vector.number("Property_to_Total_Ratio"), Some(0.0));
    }

    /// Total_Claim = 0 → all ratios 0 whatever else is set
    #[test]
    fn test_zero_total_zeroes_ratios() {
        let record = full_record().with_field("Total_Claim", 0.0);
        let vector = prepare_claim_data(&record, 2025).unwrap();

        assert_eq!(vector.number("Vehicle_to_Total_Ratio"), Some(0.0));
        assert_eq!(vector.number("Injury_to_Total_Ratio"), Some(0.0));
        assert_eq!(vector.number("Property_to_Total_Ratio"), Some(0.0));
    }

    #[test]
    fn test_vehicle_ratio_exact() {
        let record = ClaimRecord::new("X")
            .with_field("Total_Claim", 1000.0)
            .with_field("Vehicle_Cost", 300.0);
        let vector = prepare_claim_data(&record, 2025).unwrap();

        assert_eq!(vector.number("Vehicle_to_Total_Ratio"), Some(0.3));
    }

    #[test]
    fn test_vehicle_age_against_reference_year() {
        let record = ClaimRecord::new("X").with_field("Auto_Year", 2015.0);
        for year in [2015, 2020, 2031] {
            let vector = prepare_claim_data(&record, year).unwrap();
            assert_eq!(vector.number("Vehicle_Age"), Some(f64::from(year - 2015)));
        }
    }

    /// Key set is exactly the layout plus State_Mismatch
    #[test]
    fn test_key_set_is_layout_plus_state_mismatch() {
        for record in [ClaimRecord::new("X"), full_record().with_field("Unrelated", "junk")] {
            let vector = prepare_claim_data(&record, 2025).unwrap();
            let keys: HashSet<&str> = vector.keys().into_iter().collect();

            let mut expected: HashSet<&str> = FEATURE_LAYOUT.iter().map(|s| s.name).collect();
            expected.insert("State_Mismatch");

            assert_eq!(keys, expected);
            assert_eq!(vector.values().len(), FEATURE_COUNT);
        }
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let record = full_record();
        let first = prepare_claim_data(&record, 2025).unwrap();
        let second = prepare_claim_data(&record, 2025).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_record_mapping() {
        let vector = prepare_claim_data(&full_record(), 2025).unwrap();

        assert_eq!(vector.number("Customer_Life_Value1"), Some(12500.0));
        assert_eq!(vector.text("Policy_BI").as_deref(), Some("250/500"));
        assert_eq!(vector.number("Vehicle_Age"), Some(13.0));
        assert_eq!(vector.number("Vehicle_to_Total_Ratio"), Some(0.3));
        assert_eq!(vector.number("Injury_to_Total_Ratio"), Some(0.1));
        assert_eq!(vector.number("Property_to_Total_Ratio"), Some(0.2));
        assert_eq!(vector.state_mismatch(), Some(1));
        // Untouched categorical default
        assert_eq!(vector.text("Vehicle_Color").as_deref(), Some("missing"));
    }

    /// Rows read from a CSV go through the same path
    #[test]
    fn test_prepare_from_store_row() {
        let data = "\
Claim_ID,Total_Claim,Vehicle_Cost,Auto_Year,Policy_State,Acccident_State,Gender
AB1,2000,500,2019,OH,OH,FEMALE
";
        let store = ClaimStore::from_reader(data.as_bytes()).unwrap();
        let record = store.find("AB1").unwrap();
        let vector = prepare_claim_data(record, 2025).unwrap();

        assert_eq!(vector.number("Vehicle_to_Total_Ratio"), Some(0.25));
        assert_eq!(vector.number("Vehicle_Age"), Some(6.0));
        assert_eq!(vector.text("Gender").as_deref(), Some("FEMALE"));
        assert_eq!(vector.state_mismatch(), Some(0));
    }
}
