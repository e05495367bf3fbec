//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (listen address, timeout)
//!     → validation.rs (semantic checks)
//!     → UpdogConfig (validated, immutable)
//!     → checks::Registry::from_config
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{read_config, ConfigError};
pub use schema::{
    AmqpDependency, DependenciesConfig, FileDependency, HttpDependency, LogFormat,
    ObservabilityConfig, RedisDependency, SqlDependency, UpdogConfig,
};
pub use validation::{validate_config, ValidationError};
