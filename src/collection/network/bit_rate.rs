//! Optional sources for an interface's link speed.
//!
//! Most platforms have nothing to offer here, so the default is
//! [`NoBitRate`]. Lookups treat any error from these as "unknown" and fall back
//! to [`DEFAULT_BIT_RATE`](super::DEFAULT_BIT_RATE).

use crate::collection::error::{CollectionError, CollectionResult};

/// Looks up the link speed of an interface, in bits per second.
pub trait BitRateSource: Send + Sync {
    fn bit_rate(&self, interface: &str) -> CollectionResult<u64>;
}

/// A source that never knows the bit rate.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBitRate;

impl BitRateSource for NoBitRate {
    fn bit_rate(&self, _interface: &str) -> CollectionResult<u64> {
        Err(CollectionError::speed_source(
            "no bit rate source is available on this platform",
        ))
    }
}

cfg_if::cfg_if! {
    if #[cfg(all(target_os = "linux", feature = "wireless"))] {
        pub use self::linux::{SysfsBitRate, WirelessBitRate};

        /// Returns the bit rate source for this build.
        pub fn default_bit_rate_source() -> Box<dyn BitRateSource> {
            Box::new(WirelessBitRate)
        }
    } else {
        #[cfg(target_os = "linux")]
        pub use self::linux::SysfsBitRate;

        /// Returns the bit rate source for this build.
        pub fn default_bit_rate_source() -> Box<dyn BitRateSource> {
            Box::new(NoBitRate)
        }
    }
}

#[cfg(target_os = "linux")]
mod linux {
    use std::{fs, path::PathBuf};

    use super::BitRateSource;
    use crate::collection::error::{CollectionError, CollectionResult};

    /// Reads `/sys/class/net/<interface>/speed`, which is in Mbit/s.
    ///
    /// Some interfaces (e.g. ppp, or anything that is down) don't support speed
    /// queries, and report an error or a bogus value instead.
    #[derive(Clone, Debug)]
    pub struct SysfsBitRate {
        root: PathBuf,
    }

    impl SysfsBitRate {
        pub const DEFAULT_ROOT: &'static str = "/sys/class/net";

        /// 65535 (and anything above it) means "unknown".
        const UNKNOWN_SPEED: u64 = 65535;

        pub fn new<P: Into<PathBuf>>(root: P) -> Self {
            Self { root: root.into() }
        }
    }

    impl Default for SysfsBitRate {
        fn default() -> Self {
            Self::new(Self::DEFAULT_ROOT)
        }
    }

    impl BitRateSource for SysfsBitRate {
        fn bit_rate(&self, interface: &str) -> CollectionResult<u64> {
            let path = self.root.join(interface).join("speed");
            let contents = fs::read_to_string(&path).map_err(|err| {
                CollectionError::speed_source(format!("cannot read {}: {err}", path.display()))
            })?;

            match contents.trim().parse::<i64>() {
                Ok(mbits) if mbits > 0 && (mbits as u64) < Self::UNKNOWN_SPEED => {
                    Ok(mbits as u64 * 1_000_000)
                }
                _ => Err(CollectionError::speed_source(format!(
                    "'{interface}' reported an unknown speed"
                ))),
            }
        }
    }

    /// Asks the wireless extensions for the current bit rate via `SIOCGIWRATE`.
    #[cfg(feature = "wireless")]
    #[derive(Clone, Copy, Debug, Default)]
    pub struct WirelessBitRate;

    #[cfg(feature = "wireless")]
    mod bindings {
        /// From `linux/wireless.h`.
        pub(super) const SIOCGIWRATE: u32 = 0x8B21;

        /// `struct iw_param`.
        #[repr(C)]
        #[derive(Clone, Copy)]
        #[allow(dead_code)]
        pub(super) struct IwParam {
            pub(super) value: i32,
            pub(super) fixed: u8,
            pub(super) disabled: u8,
            pub(super) flags: u16,
        }

        /// `union iwreq_data`; its largest members are 16 bytes.
        #[repr(C)]
        pub(super) union IwReqData {
            pub(super) bitrate: IwParam,
            pub(super) raw: [u8; 16],
        }

        /// `struct iwreq`.
        #[repr(C)]
        pub(super) struct IwReq {
            pub(super) ifr_name: [libc::c_char; libc::IFNAMSIZ],
            pub(super) u: IwReqData,
        }
    }

    #[cfg(feature = "wireless")]
    impl BitRateSource for WirelessBitRate {
        fn bit_rate(&self, interface: &str) -> CollectionResult<u64> {
            use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

            use self::bindings::*;

            let name = interface.as_bytes();
            if name.len() >= libc::IFNAMSIZ || name.contains(&0) {
                return Err(CollectionError::speed_source(format!(
                    "'{interface}' is not a valid interface name"
                )));
            }

            let mut request = IwReq {
                ifr_name: [0; libc::IFNAMSIZ],
                u: IwReqData { raw: [0; 16] },
            };
            for (dst, &src) in request.ifr_name.iter_mut().zip(name) {
                *dst = src as libc::c_char;
            }

            // SAFETY: this is a libc API; we check the returned descriptor below.
            let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
            if fd < 0 {
                return Err(CollectionError::speed_source(
                    std::io::Error::last_os_error().to_string(),
                ));
            }

            // SAFETY: `fd` was just returned by `socket` and nothing else owns it.
            let socket = unsafe { OwnedFd::from_raw_fd(fd) };

            // SAFETY: `request` is a valid, zero-initialized `struct iwreq` that lives
            // for the duration of the call.
            let result = unsafe {
                libc::ioctl(
                    socket.as_raw_fd(),
                    SIOCGIWRATE as _,
                    &mut request as *mut IwReq,
                )
            };
            if result < 0 {
                return Err(CollectionError::speed_source(
                    std::io::Error::last_os_error().to_string(),
                ));
            }

            // SAFETY: a successful SIOCGIWRATE fills in the `bitrate` member.
            let bit_rate = unsafe { request.u.bitrate.value };

            u64::try_from(bit_rate)
                .ok()
                .filter(|&rate| rate > 0)
                .ok_or_else(|| {
                    CollectionError::speed_source(format!(
                        "'{interface}' reported an unknown bit rate"
                    ))
                })
        }
    }

}
