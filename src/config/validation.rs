//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Dependency names are non-empty and unique across all kinds
//! - Endpoints and addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: UpdogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use url::Url;

use crate::checks::sql::ENGINES;
use crate::config::schema::UpdogConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listen_address {0:?} is not a socket address")]
    ListenAddress(String),

    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("a {kind} dependency has an empty name")]
    EmptyName { kind: &'static str },

    #[error("dependency name {0:?} is used more than once")]
    DuplicateName(String),

    #[error("dependency {name:?}: invalid url {value:?}")]
    InvalidUrl { name: String, value: String },

    #[error("dependency {name:?}: unsupported sql engine {engine:?} (expected one of {})", ENGINES.join(", "))]
    UnsupportedEngine { name: String, engine: String },

    #[error("dependency {name:?}: empty {field}")]
    EmptyField { name: String, field: &'static str },
}

pub fn validate_config(config: &UpdogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listen_socket_addr().is_err() {
        errors.push(ValidationError::ListenAddress(config.listen_address.clone()));
    }

    if config.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let deps = &config.dependencies;
    let kinded = deps
        .http
        .iter()
        .map(|d| ("http", d.name.as_str()))
        .chain(deps.redis.iter().map(|d| ("redis", d.name.as_str())))
        .chain(deps.sql.iter().map(|d| ("sql", d.name.as_str())))
        .chain(deps.amqp.iter().map(|d| ("amqp", d.name.as_str())))
        .chain(deps.file.iter().map(|d| ("file", d.name.as_str())));

    let mut seen = HashSet::new();
    for (kind, name) in kinded {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { kind });
        } else if !seen.insert(name) {
            errors.push(ValidationError::DuplicateName(name.to_string()));
        }
    }

    for dep in &deps.http {
        if !matches!(Url::parse(&dep.endpoint), Ok(url) if matches!(url.scheme(), "http" | "https")) {
            errors.push(ValidationError::InvalidUrl {
                name: dep.name.clone(),
                value: dep.endpoint.clone(),
            });
        }
    }

    for dep in &deps.redis {
        if dep.address.trim().is_empty() {
            errors.push(ValidationError::EmptyField {
                name: dep.name.clone(),
                field: "address",
            });
        }
    }

    for dep in &deps.sql {
        if !ENGINES.contains(&dep.engine.as_str()) {
            errors.push(ValidationError::UnsupportedEngine {
                name: dep.name.clone(),
                engine: dep.engine.clone(),
            });
        }
        if dep.connection_string.trim().is_empty() {
            errors.push(ValidationError::EmptyField {
                name: dep.name.clone(),
                field: "connection_string",
            });
        }
    }

    for dep in &deps.amqp {
        if Url::parse(&dep.dsn).is_err() {
            errors.push(ValidationError::InvalidUrl {
                name: dep.name.clone(),
                value: dep.dsn.clone(),
            });
        }
    }

    for dep in &deps.file {
        if dep.path.trim().is_empty() {
            errors.push(ValidationError::EmptyField {
                name: dep.name.clone(),
                field: "path",
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
