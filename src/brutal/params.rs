//! Kernel-facing parameter block.
//!
//! The receiving kernel module reads raw bytes at fixed offsets, so the
//! layout is serialized by hand: 8-byte rate, then 4-byte gain, native
//! byte order, no padding. This is a same-host kernel interface, not a
//! network protocol.

use std::os::raw::c_int;

/// Private socket option understood by the brutal kernel module.
pub const TCP_BRUTAL_PARAMS: c_int = 23301;

/// Parameter block pushed to the kernel per connection.
///
/// Constructed fresh from the resolved configuration immediately before
/// the socket-option call; never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrutalParams {
    /// Send rate in bytes per second.
    pub rate: u64,

    /// CWND gain in tenths (10 = 1.0).
    pub cwnd_gain: u32,
}

impl BrutalParams {
    /// Exact size of the wire layout.
    pub const WIRE_LEN: usize = 12;

    /// Serialize to the kernel layout.
    pub fn to_bytes(&self) -> [u8; Self::WIRE_LEN] {
        let mut buf = [0u8; Self::WIRE_LEN];
        buf[..8].copy_from_slice(&self.rate.to_ne_bytes());
        buf[8..].copy_from_slice(&self.cwnd_gain.to_ne_bytes());
        buf
    }

    /// Inverse of [`BrutalParams::to_bytes`].
    pub fn from_bytes(buf: [u8; Self::WIRE_LEN]) -> Self {
        let mut rate = [0u8; 8];
        rate.copy_from_slice(&buf[..8]);
        let mut cwnd_gain = [0u8; 4];
        cwnd_gain.copy_from_slice(&buf[8..]);

        Self {
            rate: u64::from_ne_bytes(rate),
            cwnd_gain: u32::from_ne_bytes(cwnd_gain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_layout_has_no_padding() {
        assert_eq!(
            BrutalParams::WIRE_LEN,
            std::mem::size_of::<u64>() + std::mem::size_of::<u32>()
        );
    }

    #[test]
    fn round_trip_preserves_values() {
        let params = BrutalParams {
            rate: 1_000_000,
            cwnd_gain: 20,
        };
        assert_eq!(BrutalParams::from_bytes(params.to_bytes()), params);
    }

    #[test]
    fn fields_land_at_fixed_offsets() {
        let params = BrutalParams {
            rate: 0x0102_0304_0506_0708,
            cwnd_gain: 0x0A0B_0C0D,
        };
        let buf = params.to_bytes();

        assert_eq!(buf[..8], 0x0102_0304_0506_0708u64.to_ne_bytes());
        assert_eq!(buf[8..], 0x0A0B_0C0Du32.to_ne_bytes());
    }
}
