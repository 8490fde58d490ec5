//! Session surface the hook consumes.
//!
//! # Responsibilities
//! - Expose the minimum an accepted connection must reveal: socket
//!   descriptor, transport address family, owning server context
//! - Adapt tokio stream types to that surface
//!
//! # Design Decisions
//! - The hook never owns the stream; the host keeps driving I/O
//! - Address family is captured at accept time, not re-queried per call

use std::net::SocketAddr;
use std::os::fd::{AsRawFd, RawFd};

use tokio::net::{TcpStream, UnixStream};

use crate::config::loader::ServerId;

/// Transport address family of an accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    /// IPv4.
    Inet,
    /// IPv6.
    Inet6,
    /// Unix domain socket.
    Unix,
}

impl AddressFamily {
    /// True for real TCP/IP sockets. Congestion-control negotiation only
    /// makes sense for these.
    pub fn is_inet(&self) -> bool {
        matches!(self, AddressFamily::Inet | AddressFamily::Inet6)
    }
}

impl From<&SocketAddr> for AddressFamily {
    fn from(addr: &SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(_) => AddressFamily::Inet,
            SocketAddr::V6(_) => AddressFamily::Inet6,
        }
    }
}

/// What the hook may ask of an accepted connection.
pub trait Session {
    /// Raw descriptor of the underlying socket.
    fn socket_fd(&self) -> RawFd;

    /// Transport address family, captured at accept time.
    fn address_family(&self) -> AddressFamily;

    /// The server context this connection was accepted for.
    fn server_id(&self) -> ServerId;
}

/// Session view of a TCP connection accepted by a tokio host.
pub struct TcpSession<'a> {
    stream: &'a TcpStream,
    family: AddressFamily,
    server: ServerId,
}

impl<'a> TcpSession<'a> {
    /// Build a session view from an accepted stream and its peer address.
    pub fn new(stream: &'a TcpStream, peer: SocketAddr, server: ServerId) -> Self {
        Self {
            stream,
            family: AddressFamily::from(&peer),
            server,
        }
    }
}

impl Session for TcpSession<'_> {
    fn socket_fd(&self) -> RawFd {
        self.stream.as_raw_fd()
    }

    fn address_family(&self) -> AddressFamily {
        self.family
    }

    fn server_id(&self) -> ServerId {
        self.server
    }
}

/// Session view of a Unix domain connection.
///
/// The hook declines these; the adapter exists so hosts can run every
/// accepted stream through the same setup pipeline.
pub struct UnixSession<'a> {
    stream: &'a UnixStream,
    server: ServerId,
}

impl<'a> UnixSession<'a> {
    pub fn new(stream: &'a UnixStream, server: ServerId) -> Self {
        Self { stream, server }
    }
}

impl Session for UnixSession<'_> {
    fn socket_fd(&self) -> RawFd {
        self.stream.as_raw_fd()
    }

    fn address_family(&self) -> AddressFamily {
        AddressFamily::Unix
    }

    fn server_id(&self) -> ServerId {
        self.server
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_family_from_socket_addr() {
        let v4: SocketAddr = "127.0.0.1:8388".parse().unwrap();
        let v6: SocketAddr = "[::1]:8388".parse().unwrap();

        assert_eq!(AddressFamily::from(&v4), AddressFamily::Inet);
        assert_eq!(AddressFamily::from(&v6), AddressFamily::Inet6);
    }

    #[test]
    fn only_ip_families_are_inet() {
        assert!(AddressFamily::Inet.is_inet());
        assert!(AddressFamily::Inet6.is_inet());
        assert!(!AddressFamily::Unix.is_inet());
    }
}
