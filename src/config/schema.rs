//! Configuration schema definitions.
//!
//! This module defines the directive surface for the brutal hook.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for a stream server tree.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StreamConfig {
    /// Directives declared at the outermost context. They apply to every
    /// server that does not override them.
    pub tcp_brutal: BrutalDirectives,

    /// Logical server contexts.
    pub servers: Vec<ServerConfig>,
}

/// One logical server context.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Unique server identifier for logging and lookup.
    pub name: String,

    /// Listen address (e.g. "0.0.0.0:8388"). Binding is the host's
    /// concern; the value is carried through untouched.
    pub listen: String,

    /// Per-server directive overrides.
    #[serde(default)]
    pub tcp_brutal: BrutalDirectives,
}

/// The raw directive set attached to one context.
///
/// `None` means "not declared here": the value is inherited from the
/// parent context during resolution, or defaulted if no ancestor declares
/// it either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BrutalDirectives {
    /// Turns the hook on or off for this context and its descendants.
    pub enable: Option<bool>,

    /// Target send rate in bytes per second. No upper bound is enforced.
    pub rate: Option<u64>,

    /// Congestion-window gain in tenths (15 = 1.5x). Must resolve into
    /// [5, 80].
    pub cwnd_gain: Option<u32>,
}

impl BrutalDirectives {
    /// True if no directive is declared at this context.
    pub fn is_empty(&self) -> bool {
        self.enable.is_none() && self.rate.is_none() && self.cwnd_gain.is_none()
    }
}
