//! The per-connection negotiation hook.
//!
//! # Responsibilities
//! - Look up the owning server's effective configuration
//! - Run the application decision and issue the two option-set calls
//! - Log failures with errno context and report them upward once
//!
//! # Design Decisions
//! - Success and "not applicable" are indistinguishable to the host: both
//!   continue processing (changing this would alter host-visible semantics)
//! - No retry and no fallback algorithm; one failed call fails the
//!   connection, sibling connections are unaffected

use std::os::fd::RawFd;
use std::sync::Arc;

use thiserror::Error;

use crate::brutal::decide::{decide, Decision};
use crate::brutal::sockopt::{SocketOps, CONGESTION_ALGORITHM};
use crate::config::loader::{ResolvedConfig, ServerId};
use crate::net::phase::{ConnectionHandler, Phase, PhaseError, PhaseRegistry};
use crate::net::session::Session;

/// Per-connection failure while applying the algorithm. Never fatal to the
/// process; the host decides whether to abort the connection.
#[derive(Debug, Error)]
pub enum HookError {
    /// Selecting the algorithm by name failed.
    #[error("TCP_CONGESTION failed on fd {fd}: {source}")]
    SetCongestion {
        fd: RawFd,
        #[source]
        source: std::io::Error,
    },

    /// Pushing the parameter block failed.
    #[error("brutal_params failed on fd {fd}: {source}")]
    SetParams {
        fd: RawFd,
        #[source]
        source: std::io::Error,
    },

    /// The session references a server context the configuration does not
    /// know. Host wiring gone wrong.
    #[error("unknown server context {0}")]
    UnknownServer(ServerId),
}

/// The connection hook. One instance serves every connection; it holds the
/// shared read-only configuration and the socket-option implementation.
pub struct TcpBrutalHook<O: SocketOps> {
    config: Arc<ResolvedConfig>,
    ops: O,
}

impl<O: SocketOps> TcpBrutalHook<O> {
    pub fn new(config: Arc<ResolvedConfig>, ops: O) -> Self {
        Self { config, ops }
    }

    /// Install the hook at the preread phase. Called once, at
    /// configuration-finalization time.
    pub fn register(self, registry: &mut PhaseRegistry)
    where
        O: 'static,
    {
        registry.register(Phase::Preread, Box::new(self));
    }

    /// Apply the negotiation to one accepted connection.
    pub fn on_connection(&self, session: &dyn Session) -> Result<(), HookError> {
        let server = self
            .config
            .server(session.server_id())
            .ok_or(HookError::UnknownServer(session.server_id()))?;

        let params = match decide(&server.brutal, session.address_family()) {
            Decision::Skip(_) => return Ok(()),
            Decision::Apply(params) => params,
        };

        let fd = session.socket_fd();

        if let Err(source) = self.ops.set_congestion_algorithm(fd, CONGESTION_ALGORITHM) {
            tracing::error!(
                server = %server.name,
                fd,
                error = %source,
                "tcp_brutal: TCP_CONGESTION failed"
            );
            return Err(HookError::SetCongestion { fd, source });
        }

        if let Err(source) = self.ops.set_brutal_params(fd, &params) {
            tracing::error!(
                server = %server.name,
                fd,
                error = %source,
                "tcp_brutal: brutal_params failed"
            );
            return Err(HookError::SetParams { fd, source });
        }

        Ok(())
    }
}

impl<O: SocketOps> ConnectionHandler for TcpBrutalHook<O> {
    fn handle(&self, session: &dyn Session) -> Result<(), PhaseError> {
        self.on_connection(session).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brutal::params::BrutalParams;
    use crate::net::session::AddressFamily;
    use std::io;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Congestion(RawFd, String),
        Params(RawFd, Vec<u8>),
    }

    #[derive(Default)]
    struct RecordingOps {
        fail_congestion: bool,
        fail_params: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingOps {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SocketOps for RecordingOps {
        fn set_congestion_algorithm(&self, fd: RawFd, name: &str) -> io::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Congestion(fd, name.to_string()));
            if self.fail_congestion {
                return Err(io::Error::from_raw_os_error(libc::ENOPROTOOPT));
            }
            Ok(())
        }

        fn set_brutal_params(&self, fd: RawFd, params: &BrutalParams) -> io::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Params(fd, params.to_bytes().to_vec()));
            if self.fail_params {
                return Err(io::Error::from_raw_os_error(libc::EINVAL));
            }
            Ok(())
        }
    }

    struct FakeSession {
        fd: RawFd,
        family: AddressFamily,
        server: ServerId,
    }

    impl Session for FakeSession {
        fn socket_fd(&self) -> RawFd {
            self.fd
        }

        fn address_family(&self) -> AddressFamily {
            self.family
        }

        fn server_id(&self) -> ServerId {
            self.server
        }
    }

    fn config(toml: &str) -> Arc<ResolvedConfig> {
        Arc::new(ResolvedConfig::from_toml_str(toml).unwrap())
    }

    fn session(family: AddressFamily) -> FakeSession {
        FakeSession {
            fd: 7,
            family,
            server: ServerId(0),
        }
    }

    const ENABLED: &str = r#"
        [tcp_brutal]
        enable = true
        rate = 1000000
        cwnd_gain = 20

        [[servers]]
        name = "relay"
        listen = "0.0.0.0:8388"
    "#;

    #[test]
    fn disabled_server_performs_no_socket_operations() {
        let ops = Arc::new(RecordingOps::default());
        let hook = TcpBrutalHook::new(
            config(
                r#"
                [[servers]]
                name = "relay"
                listen = "0.0.0.0:8388"
                "#,
            ),
            ops.clone(),
        );

        hook.on_connection(&session(AddressFamily::Inet)).unwrap();
        assert!(ops.calls().is_empty());
    }

    #[test]
    fn unix_transport_performs_no_socket_operations() {
        let ops = Arc::new(RecordingOps::default());
        let hook = TcpBrutalHook::new(config(ENABLED), ops.clone());

        hook.on_connection(&session(AddressFamily::Unix)).unwrap();
        assert!(ops.calls().is_empty());
    }

    #[test]
    fn success_issues_exactly_two_byte_exact_operations() {
        let ops = Arc::new(RecordingOps::default());
        let hook = TcpBrutalHook::new(config(ENABLED), ops.clone());

        hook.on_connection(&session(AddressFamily::Inet6)).unwrap();

        let expected = BrutalParams {
            rate: 1_000_000,
            cwnd_gain: 20,
        };
        assert_eq!(
            ops.calls(),
            vec![
                Call::Congestion(7, "brutal".to_string()),
                Call::Params(7, expected.to_bytes().to_vec()),
            ]
        );
    }

    #[test]
    fn congestion_failure_skips_params_push() {
        let ops = Arc::new(RecordingOps {
            fail_congestion: true,
            ..Default::default()
        });
        let hook = TcpBrutalHook::new(config(ENABLED), ops.clone());

        let err = hook.on_connection(&session(AddressFamily::Inet)).unwrap_err();
        assert!(matches!(err, HookError::SetCongestion { fd: 7, .. }));
        assert_eq!(ops.calls(), vec![Call::Congestion(7, "brutal".to_string())]);
    }

    #[test]
    fn params_failure_is_reported() {
        let ops = Arc::new(RecordingOps {
            fail_params: true,
            ..Default::default()
        });
        let hook = TcpBrutalHook::new(config(ENABLED), ops.clone());

        let err = hook.on_connection(&session(AddressFamily::Inet)).unwrap_err();
        assert!(matches!(err, HookError::SetParams { fd: 7, .. }));
        assert_eq!(ops.calls().len(), 2);
    }

    #[test]
    fn unknown_server_context_is_an_error() {
        let ops = Arc::new(RecordingOps::default());
        let hook = TcpBrutalHook::new(config(ENABLED), ops.clone());

        let stray = FakeSession {
            fd: 7,
            family: AddressFamily::Inet,
            server: ServerId(9),
        };
        let err = hook.on_connection(&stray).unwrap_err();
        assert!(matches!(err, HookError::UnknownServer(ServerId(9))));
        assert!(ops.calls().is_empty());
    }
}
