//! Config schema - weights and ceiling for progress scoring

use serde::{Deserialize, Serialize};

use crate::errors::{AbmixError, Result};

/// Scoring configuration.
///
/// A weight only takes part in the average when its collection is present,
/// so the weights need not sum to 1.0. Weights are applied with a precision
/// of 0.0001.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the titulares sub-score
    #[serde(default = "default_titular_weight")]
    pub titular_weight: f64,

    /// Weight of the dependentes sub-score
    #[serde(default = "default_dependent_weight")]
    pub dependent_weight: f64,

    /// Weight of the attachments sub-score, always applied
    #[serde(default = "default_attachment_weight")]
    pub attachment_weight: f64,

    /// Highest score reachable before the proposal is implemented
    #[serde(default = "default_pre_approval_ceiling")]
    pub pre_approval_ceiling: u8,
}

fn default_titular_weight() -> f64 {
    0.7
}

fn default_dependent_weight() -> f64 {
    0.2
}

fn default_attachment_weight() -> f64 {
    0.1
}

fn default_pre_approval_ceiling() -> u8 {
    99
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            titular_weight: default_titular_weight(),
            dependent_weight: default_dependent_weight(),
            attachment_weight: default_attachment_weight(),
            pre_approval_ceiling: default_pre_approval_ceiling(),
        }
    }
}

impl ScoringConfig {
    /// Check that the weights can produce a well-defined average.
    ///
    /// # Errors
    /// * `ConfigError` - negative or non-finite weights, a non-positive
    ///   attachment weight, or a ceiling above 100
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("titular_weight", self.titular_weight),
            ("dependent_weight", self.dependent_weight),
            ("attachment_weight", self.attachment_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AbmixError::ConfigError(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, weight
                )));
            }
        }
        // Attachments are the only weight that is always applied, and
        // weights are resolved to ten-thousandths when scoring.
        if self.attachment_weight < 0.0001 {
            return Err(AbmixError::ConfigError(
                "attachment_weight must be at least 0.0001".to_string(),
            ));
        }
        if self.pre_approval_ceiling > 100 {
            return Err(AbmixError::ConfigError(format!(
                "pre_approval_ceiling must be at most 100 (got {})",
                self.pre_approval_ceiling
            )));
        }
        Ok(())
    }
}
