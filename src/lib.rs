//! TCP Brutal negotiation hook for stream proxies.
//!
//! For every accepted stream connection on a configured server context this
//! library selects the `brutal` congestion-control algorithm on the
//! underlying socket and pushes a target send rate and congestion-window
//! gain into the kernel through a private socket-option channel. The host
//! framework owns the accept loop and content forwarding; this crate only
//! decides whether and with what parameters to engage the algorithm.

pub mod brutal;
pub mod config;
pub mod net;

pub use brutal::hook::TcpBrutalHook;
pub use brutal::params::BrutalParams;
pub use config::loader::{load_config, ResolvedConfig, ServerId};
pub use config::resolve::BrutalConfig;
