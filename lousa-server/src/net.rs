//! Public URL resolution for the display QR code
//!
//! Phones scan the QR on the display, so it must point at an address they
//! can reach. When the display page itself was opened through a loopback
//! address we substitute the machine's LAN IP.

use axum::http::{header, HeaderMap};
use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Used when the LAN address cannot be discovered
pub const LOOPBACK_FALLBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Discover the LAN-facing IPv4 address of this machine.
///
/// Connecting a UDP socket sends nothing; it only makes the OS pick the
/// outbound interface. Any failure yields 127.0.0.1.
pub fn local_ip() -> IpAddr {
    match probe_local_ip() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::debug!("LAN address discovery failed: {}", e);
            LOOPBACK_FALLBACK
        }
    }
}

fn probe_local_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.connect("8.8.8.8:80")?;
    Ok(socket.local_addr()?.ip())
}

/// Base URL for the QR code, without trailing slash.
///
/// Preference:
/// 1. the configured override
/// 2. scheme and host of the request, with a loopback host replaced by
///    `lan_ip` (port preserved)
pub fn public_base_url(configured: Option<&str>, headers: &HeaderMap, lan_ip: impl FnOnce() -> IpAddr) -> String {
    if let Some(url) = configured.map(str::trim).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }

    let scheme = request_scheme(headers);
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");

    let base = format!("{}://{}", scheme, host);
    if !is_loopback_host(host) {
        return base.trim_end_matches('/').to_string();
    }

    let ip = lan_ip();
    match split_port(host) {
        Some(port) => format!("{}://{}:{}", scheme, ip, port),
        None => format!("{}://{}", scheme, ip),
    }
}

fn request_scheme(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http")
}

fn is_loopback_host(host: &str) -> bool {
    host.contains("localhost") || host.contains("127.0.0.1")
}

/// Port part of a `host[:port]` value
fn split_port(host: &str) -> Option<&str> {
    host.split_once(':')
        .map(|(_, port)| port)
        .filter(|port| !port.is_empty())
}
