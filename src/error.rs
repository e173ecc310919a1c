use thiserror::Error;

/// A lead row that cannot be scored. The row is skipped; the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("malformed email '{0}'")]
    InvalidEmail(String),
}

impl ValidationError {
    /// Name of the offending field, for per-row reporting
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::InvalidEmail(_) => "email",
        }
    }
}

/// Invalid weight configuration. Blocks scoring entirely until corrected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be non-negative (got {value})")]
    NegativeWeight { name: &'static str, value: f64 },

    #[error("{name} must be between 0 and 1 (got {value})")]
    WeightOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be a finite number")]
    NonFiniteWeight { name: &'static str },

    #[error("weights sum to zero; at least one weight must be positive")]
    ZeroWeightSum,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_field() {
        assert_eq!(ValidationError::MissingField("email").field(), "email");
        assert_eq!(
            ValidationError::InvalidEmail("nope".to_string()).field(),
            "email"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::MissingField("company_domain").to_string(),
            "missing required field 'company_domain'"
        );
        assert_eq!(
            ConfigError::NegativeWeight {
                name: "intent_weight",
                value: -0.5
            }
            .to_string(),
            "intent_weight must be non-negative (got -0.5)"
        );
    }

    #[test]
    fn test_scoring_error_is_transparent() {
        let err: ScoringError = ConfigError::ZeroWeightSum.into();
        assert_eq!(
            err.to_string(),
            "weights sum to zero; at least one weight must be positive"
        );
    }
}
