//! Directive resolution.
//!
//! # Responsibilities
//! - Merge parent and child directive sets (child overrides win)
//! - Apply hard-coded defaults to fields no context declares
//! - Validate `cwnd_gain` against its legal range
//!
//! # Design Decisions
//! - Resolution happens once, at load time; connections only read the result
//! - A range violation fails the whole load, never a single server
//! - Inheritance chains of any depth fold through the same field-wise rule

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::config::loader::ConfigError;
use crate::config::schema::BrutalDirectives;

/// Default send rate in bytes per second. A placeholder minimum, not a
/// production value; real deployments always set `rate`.
pub const DEFAULT_RATE: u64 = 2;

/// Default congestion-window gain in tenths (1.5x).
pub const DEFAULT_CWND_GAIN: u32 = 15;

/// Legal range for `cwnd_gain`, inclusive.
pub const CWND_GAIN_RANGE: RangeInclusive<u32> = 5..=80;

/// A fully-populated effective configuration for one server context.
///
/// Immutable once produced; shared read-only across however many
/// connection handlers the host runs concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrutalConfig {
    /// Whether the hook applies at all for this context.
    pub enable: bool,

    /// Target send rate in bytes per second.
    pub rate: u64,

    /// Congestion-window gain in tenths.
    pub cwnd_gain: u32,
}

impl BrutalDirectives {
    /// Field-wise inheritance: values declared here win, unset fields take
    /// the parent's.
    pub fn inherit(&self, parent: &BrutalDirectives) -> BrutalDirectives {
        BrutalDirectives {
            enable: self.enable.or(parent.enable),
            rate: self.rate.or(parent.rate),
            cwnd_gain: self.cwnd_gain.or(parent.cwnd_gain),
        }
    }

    /// Apply defaults to remaining unset fields and validate the result.
    ///
    /// `context` names the scope being resolved and only feeds error
    /// messages.
    pub fn resolve(&self, context: &str) -> Result<BrutalConfig, ConfigError> {
        let cwnd_gain = self.cwnd_gain.unwrap_or(DEFAULT_CWND_GAIN);
        if !CWND_GAIN_RANGE.contains(&cwnd_gain) {
            return Err(ConfigError::CwndGainOutOfRange {
                context: context.to_string(),
                value: cwnd_gain,
            });
        }

        Ok(BrutalConfig {
            enable: self.enable.unwrap_or(false),
            rate: self.rate.unwrap_or(DEFAULT_RATE),
            cwnd_gain,
        })
    }
}

/// Merge a child context against its (possibly already merged) parent and
/// produce the effective configuration.
pub fn merge(
    parent: &BrutalDirectives,
    child: &BrutalDirectives,
    context: &str,
) -> Result<BrutalConfig, ConfigError> {
    child.inherit(parent).resolve(context)
}

/// Resolve an inheritance chain of any depth, outermost context first.
pub fn resolve_chain<'a, I>(contexts: I, context: &str) -> Result<BrutalConfig, ConfigError>
where
    I: IntoIterator<Item = &'a BrutalDirectives>,
{
    let merged = contexts
        .into_iter()
        .fold(BrutalDirectives::default(), |parent, child| {
            child.inherit(&parent)
        });
    merged.resolve(context)
}
