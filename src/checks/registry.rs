//! Ordered, immutable collection of checkers.
//!
//! # Responsibilities
//! - Build one checker per configured dependency, once, at startup
//! - Hand out the checkers for each aggregation run
//!
//! # Design Decisions
//! - No lookup by name: results are keyed by name after they return
//! - Construction fails only on malformed input; an unreachable dependency
//!   still gets a checker that reports failure per probe

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::checks::amqp::AmqpChecker;
use crate::checks::file::file_checker;
use crate::checks::http::HttpChecker;
use crate::checks::redis::{RedisChecker, RedisUrlError};
use crate::checks::sql::SqlChecker;
use crate::checks::Checker;
use crate::config::DependenciesConfig;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("dependency {name:?}: invalid endpoint: {source}")]
    Endpoint {
        name: String,
        source: url::ParseError,
    },

    #[error("dependency {name:?}: failed to build http client: {source}")]
    HttpClient {
        name: String,
        source: reqwest::Error,
    },

    #[error("dependency {name:?}: {source}")]
    Redis {
        name: String,
        source: RedisUrlError,
    },

    #[error("dependency {name:?}: invalid connection string: {source}")]
    Sql {
        name: String,
        source: sqlx::Error,
    },
}

#[derive(Clone, Default)]
pub struct Registry {
    checkers: Vec<Arc<dyn Checker>>,
}

impl Registry {
    pub fn new(checkers: Vec<Arc<dyn Checker>>) -> Self {
        Self { checkers }
    }

    /// Build every configured checker, in configuration order.
    pub fn from_config(deps: &DependenciesConfig, timeout: Duration) -> Result<Self, RegistryError> {
        let mut checkers: Vec<Arc<dyn Checker>> = Vec::with_capacity(deps.len());

        for dep in &deps.http {
            let endpoint = Url::parse(&dep.endpoint).map_err(|source| RegistryError::Endpoint {
                name: dep.name.clone(),
                source,
            })?;
            let checker = HttpChecker::new(&dep.name, endpoint, timeout).map_err(|source| {
                RegistryError::HttpClient {
                    name: dep.name.clone(),
                    source,
                }
            })?;
            checkers.push(Arc::new(checker));
        }

        for dep in &deps.redis {
            let checker = RedisChecker::new(&dep.name, &dep.address, dep.password.as_deref(), dep.tls, timeout)
                .map_err(|source| RegistryError::Redis {
                    name: dep.name.clone(),
                    source,
                })?;
            checkers.push(Arc::new(checker));
        }

        for dep in &deps.sql {
            let checker = SqlChecker::new(&dep.name, &dep.engine, &dep.connection_string, timeout)
                .map_err(|source| RegistryError::Sql {
                    name: dep.name.clone(),
                    source,
                })?;
            checkers.push(Arc::new(checker));
        }

        for dep in &deps.amqp {
            checkers.push(Arc::new(AmqpChecker::new(&dep.name, &dep.dsn, &dep.exchange, timeout)));
        }

        for dep in &deps.file {
            checkers.push(file_checker(&dep.name, &dep.path, timeout));
        }

        Ok(Self { checkers })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Checker>> {
        self.checkers.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.checkers.iter().map(|c| c.name())
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

impl FromIterator<Arc<dyn Checker>> for Registry {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Checker>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.checkers.iter().map(|c| (c.name(), c.kind())))
            .finish()
    }
}
