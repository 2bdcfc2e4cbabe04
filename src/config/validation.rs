//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, size lists ascending)
//! - Reject output formats the engine cannot negotiate
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: OptimizerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::OptimizerConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyScratchDir,
    EmptySizeList { field: &'static str },
    UnsortedSizeList { field: &'static str },
    UnknownFormat { format: String },
    ZeroFetchTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyScratchDir => write!(f, "scratch_dir must not be empty"),
            ValidationError::EmptySizeList { field } => {
                write!(f, "{} must contain at least one entry", field)
            }
            ValidationError::UnsortedSizeList { field } => {
                write!(f, "{} must be strictly ascending", field)
            }
            ValidationError::UnknownFormat { format } => {
                write!(f, "unsupported output format: {}", format)
            }
            ValidationError::ZeroFetchTimeout => write!(f, "fetch.timeout_secs must be > 0"),
        }
    }
}

/// Validate a deserialized configuration, collecting every failure.
pub fn validate_config(config: &OptimizerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.scratch_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyScratchDir);
    }

    check_sizes(&config.image.device_sizes, "image.device_sizes", &mut errors);
    check_sizes(&config.image.image_sizes, "image.image_sizes", &mut errors);

    for format in &config.image.formats {
        if !OptimizerConfig::SUPPORTED_FORMATS.contains(&format.as_str()) {
            errors.push(ValidationError::UnknownFormat {
                format: format.clone(),
            });
        }
    }

    if config.fetch.timeout_secs == 0 {
        errors.push(ValidationError::ZeroFetchTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_sizes(sizes: &[u32], field: &'static str, errors: &mut Vec<ValidationError>) {
    if sizes.is_empty() {
        errors.push(ValidationError::EmptySizeList { field });
    } else if sizes.windows(2).any(|w| w[0] >= w[1]) {
        errors.push(ValidationError::UnsortedSizeList { field });
    }
}
