//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Overrides → Validate → Registry → Metrics → Listener
//!
//! Shutdown (shutdown.rs):
//!     SIGTERM/SIGINT → stop accepting → drain in-flight requests → exit
//! ```

pub mod shutdown;
pub mod startup;

pub use startup::{prepare_config, run, Overrides, StartupError};
