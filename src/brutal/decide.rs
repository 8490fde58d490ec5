//! Pure application decision.
//!
//! The hook's gating logic lives here, free of I/O, so it can be exercised
//! without sockets. The enable flag is checked before the transport
//! family: a disabled context never inspects the connection at all.

use crate::brutal::params::BrutalParams;
use crate::config::resolve::BrutalConfig;
use crate::net::session::AddressFamily;

/// Why the hook left a connection untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The owning context has the hook disabled.
    Disabled,
    /// The transport is not a real TCP/IP socket.
    NotInet,
}

/// What to do with one accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Perform no socket operations; processing continues unaffected.
    Skip(SkipReason),
    /// Select the algorithm and push these parameters.
    Apply(BrutalParams),
}

/// Decide whether and with what parameters to engage the algorithm.
pub fn decide(config: &BrutalConfig, family: AddressFamily) -> Decision {
    if !config.enable {
        return Decision::Skip(SkipReason::Disabled);
    }

    if !family.is_inet() {
        return Decision::Skip(SkipReason::NotInet);
    }

    Decision::Apply(BrutalParams {
        rate: config.rate,
        cwnd_gain: config.cwnd_gain,
    })
}
