//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, all violations reported)
//!     → GovernanceConfig (validated, immutable)
//!     → handed to registry / guards at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; it is set once at process startup
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AdmissionConfig, GovernanceConfig, ObservabilityConfig, StoreConfig};
pub use validation::validate_config;
