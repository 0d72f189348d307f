//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file (optional, --config)
//!     → loader.rs (read, parse)
//!     → validation.rs (semantic checks, all errors at once)
//!     → Frozen RelayConfig handed to the server
//! ```
//!
//! # Design Decisions
//! - Defaults produce a runnable relay with no file present
//! - Validation is a pure function over the parsed config
//! - Config is immutable once the server starts

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, ObservabilityConfig, RelayConfig, TimeoutConfig, TlsConfig, UpstreamConfig,
};
