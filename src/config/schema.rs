//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the image
//! proxy. All types derive Serde traits for deserialization from config
//! files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the image proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Scratch directory handed to the transformation engine for temporary
    /// artifacts.
    pub scratch_dir: PathBuf,

    /// Image handling configuration (passed through to the engine).
    pub image: ImageConfig,

    /// Origin fetch settings.
    pub fetch: FetchConfig,
}

/// Image handling configuration.
///
/// Opaque to the resolver; the adapter forwards it to the engine with the
/// loader mode forced to [`LoaderMode::Default`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Allowed device widths for responsive variants, ascending.
    pub device_sizes: Vec<u32>,

    /// Allowed fixed image widths, ascending.
    pub image_sizes: Vec<u32>,

    /// Output formats the engine may negotiate, in preference order.
    pub formats: Vec<String>,

    /// Minimum cache TTL in seconds for engine-computed cache headers.
    pub minimum_cache_ttl: u64,

    /// Source loader mode. Only the default loader (this crate's fetch
    /// callback) is supported; no external loader delegation.
    pub loader: LoaderMode,
}

/// Source loader mode for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoaderMode {
    /// Engine obtains bytes through the fetch callback supplied by the
    /// adapter.
    #[default]
    Default,
}

/// Origin fetch settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Total timeout for one origin GET in seconds.
    pub timeout_secs: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            // Default temporary folder on AWS Lambda.
            scratch_dir: PathBuf::from("/tmp"),
            image: ImageConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            device_sizes: vec![640, 750, 828, 1080, 1200, 1920, 2048, 3840],
            image_sizes: vec![16, 32, 48, 64, 96, 128, 256, 384],
            formats: vec!["image/webp".to_string()],
            minimum_cache_ttl: 60,
            loader: LoaderMode::Default,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl OptimizerConfig {
    /// Known-good output formats accepted by [`validation`](super::validation).
    pub const SUPPORTED_FORMATS: [&'static str; 2] = ["image/webp", "image/avif"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OptimizerConfig::default();
        assert_eq!(config.scratch_dir, PathBuf::from("/tmp"));
        assert_eq!(config.image.loader, LoaderMode::Default);
        assert_eq!(config.image.formats, vec!["image/webp"]);
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_minimal_toml() {
        let config: OptimizerConfig = toml::from_str("").unwrap();
        assert_eq!(config.image.device_sizes.len(), 8);
        assert_eq!(config.image.image_sizes.len(), 8);
    }

    #[test]
    fn test_loader_mode_rename() {
        let config: OptimizerConfig = toml::from_str("[image]\nloader = \"default\"").unwrap();
        assert_eq!(config.image.loader, LoaderMode::Default);
    }
}
