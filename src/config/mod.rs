//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! chainshield.toml (optional)
//!     → loader.rs (read & deserialize, or fall back to defaults when absent)
//!     → validation.rs (semantic checks)
//!     → ShieldConfig (validated, immutable)
//!     → injected into the registry, RPC client and risk scorer at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - A missing file is not an error; a broken one is fatal
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_or_default, ConfigError, ConfigSource};
pub use schema::{
    ChainConfig, Denomination, HealthConfig, LogFormat, ObservabilityConfig, RiskConfig,
    RiskWeights, RpcConfig, ShieldConfig,
};
pub use validation::ValidationError;
