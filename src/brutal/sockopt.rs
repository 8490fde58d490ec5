//! Socket-option plumbing.
//!
//! # Responsibilities
//! - Select the congestion-control algorithm by name (`TCP_CONGESTION`)
//! - Push the brutal parameter block through the private option channel
//!
//! # Design Decisions
//! - Both calls are one-shot; the caller decides what a failure means
//! - A trait seam lets tests record or fail calls without the kernel
//!   module being loaded

use std::io;
use std::os::fd::RawFd;
use std::sync::Arc;

use crate::brutal::params::{BrutalParams, TCP_BRUTAL_PARAMS};

/// Kernel name of the congestion-control algorithm.
pub const CONGESTION_ALGORITHM: &str = "brutal";

/// The two option-set operations the hook performs.
pub trait SocketOps: Send + Sync {
    /// Select a congestion-control algorithm by kernel name.
    fn set_congestion_algorithm(&self, fd: RawFd, name: &str) -> io::Result<()>;

    /// Push algorithm parameters through the private option channel.
    fn set_brutal_params(&self, fd: RawFd, params: &BrutalParams) -> io::Result<()>;
}

impl<O: SocketOps> SocketOps for Arc<O> {
    fn set_congestion_algorithm(&self, fd: RawFd, name: &str) -> io::Result<()> {
        (**self).set_congestion_algorithm(fd, name)
    }

    fn set_brutal_params(&self, fd: RawFd, params: &BrutalParams) -> io::Result<()> {
        (**self).set_brutal_params(fd, params)
    }
}

/// Real implementation backed by `setsockopt(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelSocketOps;

#[cfg(any(target_os = "linux", target_os = "android"))]
impl SocketOps for KernelSocketOps {
    fn set_congestion_algorithm(&self, fd: RawFd, name: &str) -> io::Result<()> {
        set_tcp_option(
            fd,
            libc::TCP_CONGESTION,
            name.as_ptr().cast(),
            name.len() as libc::socklen_t,
        )
    }

    fn set_brutal_params(&self, fd: RawFd, params: &BrutalParams) -> io::Result<()> {
        let buf = params.to_bytes();
        set_tcp_option(
            fd,
            TCP_BRUTAL_PARAMS,
            buf.as_ptr().cast(),
            buf.len() as libc::socklen_t,
        )
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn set_tcp_option(
    fd: RawFd,
    option: libc::c_int,
    value: *const libc::c_void,
    len: libc::socklen_t,
) -> io::Result<()> {
    let ret = unsafe { libc::setsockopt(fd, libc::IPPROTO_TCP, option, value, len) };
    if ret == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
