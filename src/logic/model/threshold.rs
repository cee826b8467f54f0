//! Risk Threshold Configuration
//!
//! Quản lý ngưỡng phân loại fraud.
//! A claim is high risk when its fraud probability is strictly above
//! the threshold.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RISK_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Base threshold (0.0 - 1.0)
    pub base_threshold: f32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            base_threshold: DEFAULT_RISK_THRESHOLD,
        }
    }
}

impl ThresholdConfig {
    /// Out-of-range values fall back to the default
    pub fn new(base: f32) -> Self {
        if !(0.0..=1.0).contains(&base) {
            log::warn!("Threshold {} outside [0, 1], using {}", base, DEFAULT_RISK_THRESHOLD);
            return Self::default();
        }
        Self { base_threshold: base }
    }

    pub fn is_high_risk(&self, probability: f32) -> bool {
        probability > self.base_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_config() {
        let config = ThresholdConfig::default();
        assert_eq!(config.base_threshold, 0.5);
    }

    #[test]
    fn test_boundary_is_low_risk() {
        let config = ThresholdConfig::default();
        assert!(!config.is_high_risk(0.5));
        assert!(config.is_high_risk(0.5001));
        assert!(!config.is_high_risk(0.0));
        assert!(config.is_high_risk(1.0));
    }

    #[test]
    fn test_out_of_range_falls_back() {
        assert_eq!(ThresholdConfig::new(1.5), ThresholdConfig::default());
        assert_eq!(ThresholdConfig::new(f32::NAN), ThresholdConfig::default());
        assert_eq!(ThresholdConfig::new(0.8).base_threshold, 0.8);
    }
}
