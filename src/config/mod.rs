//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → OptimizerConfig (validated, immutable)
//!     → passed into OptimizerAdapter::new by the host
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the host owns reload policy
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::FetchConfig;
pub use schema::ImageConfig;
pub use schema::LoaderMode;
pub use schema::OptimizerConfig;
