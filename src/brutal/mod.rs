//! Brutal congestion-control negotiation.
//!
//! # Data Flow
//! ```text
//! Accepted connection (session view)
//!     → decide.rs (enable flag + address-family gate, pure)
//!     → params.rs (fixed-layout parameter block)
//!     → sockopt.rs (TCP_CONGESTION + TCP_BRUTAL_PARAMS setsockopt calls)
//!     → hook.rs (wiring, failure logging, per-connection outcome)
//! ```
//!
//! # Design Decisions
//! - The decision core is pure; all I/O lives behind the `SocketOps` seam
//! - Both option-set calls are one-shot: no retry, no fallback algorithm
//! - The actual congestion control lives in the kernel module; this crate
//!   only negotiates it per connection

pub mod decide;
pub mod hook;
pub mod params;
pub mod sockopt;

pub use hook::{HookError, TcpBrutalHook};
pub use params::BrutalParams;
pub use sockopt::{KernelSocketOps, SocketOps};
