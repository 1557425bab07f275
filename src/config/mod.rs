//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, or JSON by extension)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProwlerConfig (validated, immutable)
//!     → one EndpointConfig handed to each probe
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All sections have defaults so a config may list only endpoints
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, Format};
pub use schema::{
    ClientConfig, EndpointConfig, LogFormat, ObservabilityConfig, ProwlerConfig, ReporterConfig,
    SinkConfig, SinkKind,
};
pub use validation::ValidationError;
