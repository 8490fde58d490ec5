//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → resolve.rs (inheritance, defaults, range checks)
//!     → ResolvedConfig (validated, immutable)
//!     → shared via Arc to all connection handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload by the host
//! - Unset directives are `Option::None`, not magic sentinel values
//! - Validation separates syntactic (serde) from semantic checks
//! - A semantic error aborts the whole load; no partial activation

pub mod loader;
pub mod resolve;
pub mod schema;

pub use loader::{load_config, ResolvedConfig, ResolvedServer, ServerId};
pub use resolve::BrutalConfig;
pub use schema::{BrutalDirectives, ServerConfig, StreamConfig};
