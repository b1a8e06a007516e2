//! Host address discovery.
//!
//! The order service advertises its address to peers through the `IP`
//! environment variable, so the supervisor resolves one routable address at
//! startup and hands it to the child. The value is advisory: callers degrade
//! to an empty string when resolution fails instead of refusing to start the
//! server.

use crate::error::SupervisorError;
use nix::ifaddrs::getifaddrs;
use nix::net::if_::InterfaceFlags;
use std::net::IpAddr;

/// Pick an address from the host interface table.
///
/// The first running, non-loopback interface carrying an IPv4 address wins;
/// IPv6-only hosts fall back to the first global IPv6 address.
pub fn resolve_host_ip() -> Result<IpAddr, SupervisorError> {
    let addrs =
        getifaddrs().map_err(|err| SupervisorError::HostResolution(err.to_string()))?;

    let mut v6_fallback = None;
    for ifaddr in addrs {
        if ifaddr.flags.contains(InterfaceFlags::IFF_LOOPBACK)
            || !ifaddr.flags.contains(InterfaceFlags::IFF_RUNNING)
        {
            continue;
        }
        let Some(addr) = ifaddr.address else { continue };

        if let Some(sin) = addr.as_sockaddr_in() {
            return Ok(IpAddr::V4(sin.ip()));
        }
        if v6_fallback.is_none() {
            if let Some(sin6) = addr.as_sockaddr_in6() {
                let ip = sin6.ip();
                // fe80::/10 is useless to peers
                if ip.segments()[0] & 0xffc0 != 0xfe80 {
                    v6_fallback = Some(IpAddr::V6(ip));
                }
            }
        }
    }

    v6_fallback.ok_or_else(|| {
        SupervisorError::HostResolution(
            "no running non-loopback interface carries an address".to_string(),
        )
    })
}
