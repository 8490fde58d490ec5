//! Connection-setup phase pipeline.
//!
//! # Responsibilities
//! - Order early per-connection handlers (post-accept, preread)
//! - Run them exactly once per accepted connection, stopping on error
//!
//! # Design Decisions
//! - The registry is built once at configuration-finalization time and
//!   immutable afterwards; workers share it behind an `Arc`
//! - Handlers never see content; forwarding starts after the pipeline
//!   returns
//! - A handler error is unrecoverable for that connection only; the host
//!   decides whether to abort it

use crate::net::session::Session;

/// Error returned by a setup handler. Unrecoverable for the connection,
/// local to it.
pub type PhaseError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Early connection-processing stages, in execution order. Content
/// forwarding begins only after every stage has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Immediately after accept; basic session state exists.
    PostAccept,
    /// Before any payload is read or proxied.
    Preread,
}

/// All phases in execution order.
pub const PHASES: [Phase; 2] = [Phase::PostAccept, Phase::Preread];

/// A handler invoked once per accepted connection during setup.
///
/// `Ok(())` declines: processing continues to later stages unaffected.
pub trait ConnectionHandler: Send + Sync {
    fn handle(&self, session: &dyn Session) -> Result<(), PhaseError>;
}

/// Ordered registry of connection-setup handlers.
pub struct PhaseRegistry {
    handlers: Vec<(Phase, Box<dyn ConnectionHandler>)>,
}

impl PhaseRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register a handler at the given phase. Within one phase, handlers
    /// run in registration order.
    pub fn register(&mut self, phase: Phase, handler: Box<dyn ConnectionHandler>) {
        self.handlers.push((phase, handler));
    }

    /// Run all setup handlers for one accepted connection. Stops at the
    /// first error and returns it; the remaining handlers never run.
    pub fn run(&self, session: &dyn Session) -> Result<(), PhaseError> {
        for phase in PHASES {
            for (registered, handler) in &self.handlers {
                if *registered == phase {
                    handler.handle(session)?;
                }
            }
        }
        Ok(())
    }

    /// Number of registered handlers across all phases.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for PhaseRegistry {
    fn default() -> Self {
        Self::new()
    }
}
