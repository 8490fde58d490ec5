//! Host-facing connection surface.
//!
//! # Data Flow
//! ```text
//! Accepted stream connection (host framework)
//!     → session.rs (descriptor, address family, owning server context)
//!     → phase.rs (ordered setup handlers, run once per connection)
//!     → Hand off to content forwarding (host framework)
//! ```
//!
//! # Design Decisions
//! - The host keeps ownership of the stream; handlers only borrow a view
//! - Setup handlers run strictly before any payload is proxied
//! - The registry is built once at configuration-finalization time

pub mod phase;
pub mod session;

pub use phase::{ConnectionHandler, Phase, PhaseRegistry};
pub use session::{AddressFamily, Session, TcpSession, UnixSession};
