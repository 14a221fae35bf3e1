//! URL validation for outgoing metadata requests.
//!
//! The metadata endpoint takes an arbitrary URL from the caller, so the
//! target must be checked against internal/private addresses before any
//! request is made.

use folio_core::{FolioError, Result};
use std::net::IpAddr;
use url::Url;

/// Check if an IP address is in a private/internal range.
pub(crate) fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()              // 127.0.0.0/8
            || v4.is_private()            // 10.0.0.0/8, 172.16.0.0/12, 192.168.0.0/16
            || v4.is_link_local()         // 169.254.0.0/16
            || v4.is_broadcast()          // 255.255.255.255
            || v4.is_unspecified()        // 0.0.0.0
            || v4.octets()[0] == 100 && (v4.octets()[1] & 0xC0) == 64 // CGN 100.64.0.0/10
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()              // ::1
            || v6.is_unspecified()        // ::
            // IPv4-mapped IPv6 (::ffff:0:0/96) — check the embedded v4
            || matches!(v6.to_ipv4_mapped(), Some(v4) if is_private_ip(&IpAddr::V4(v4)))
            // Unique local addresses (fc00::/7)
            || (v6.segments()[0] & 0xfe00) == 0xfc00
            // Link-local (fe80::/10)
            || (v6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}

/// Validate that a URL is safe to scrape: http/https only, no internal
/// hostnames, no private IP targets.
pub fn validate_url(raw_url: &str) -> Result<Url> {
    let parsed =
        Url::parse(raw_url).map_err(|e| FolioError::Scrape(format!("Invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(FolioError::Scrape(format!(
                "Scheme '{}' is not allowed (only http/https)",
                other
            )));
        }
    }

    let host = parsed.host_str().unwrap_or("");
    let blocked_hosts = ["localhost", "metadata.google.internal"];
    let blocked_suffixes = [".local", ".internal", ".localhost"];
    let lower_host = host.to_lowercase();
    if blocked_hosts.contains(&lower_host.as_str())
        || blocked_suffixes.iter().any(|s| lower_host.ends_with(s))
    {
        return Err(FolioError::Scrape(format!(
            "Host '{}' is blocked (internal address)",
            host
        )));
    }

    match parsed.host() {
        Some(url::Host::Ipv4(ip)) if is_private_ip(&IpAddr::V4(ip)) => {
            return Err(FolioError::Scrape(format!(
                "IP address {} is a private/internal address",
                ip
            )));
        }
        Some(url::Host::Ipv6(ip)) if is_private_ip(&IpAddr::V6(ip)) => {
            return Err(FolioError::Scrape(format!(
                "IP address {} is a private/internal address",
                ip
            )));
        }
        Some(url::Host::Domain(domain)) => {
            // Resolve the name and check every address it maps to.
            let port = parsed.port_or_known_default().unwrap_or(80);
            let addr_str = format!("{}:{}", domain, port);
            if let Ok(addrs) = std::net::ToSocketAddrs::to_socket_addrs(&addr_str) {
                for addr in addrs {
                    if is_private_ip(&addr.ip()) {
                        return Err(FolioError::Scrape(format!(
                            "Host '{}' resolves to private/internal address {}",
                            domain,
                            addr.ip()
                        )));
                    }
                }
            }
        }
        _ => {}
    }

    Ok(parsed)
}
