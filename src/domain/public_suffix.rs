//! Registrable-domain lookup against the Public Suffix List.
//!
//! The list is compiled into the binary by the `psl` crate, so every ICANN
//! suffix (new gTLDs such as `.berlin` included) and the private registry
//! suffixes (`github.io`, `herokuapp.com`) are recognised without network
//! access. Hosts under a private suffix keep their own label:
//! `acme.github.io` is its own registrable domain.

use std::net::IpAddr;

/// Registrable part of a lowercased host, one label below its public suffix.
///
/// Returns `None` for IP literals, for hosts whose TLD is not on the list,
/// and for hosts that are themselves a suffix.
pub(crate) fn registrable_domain(host: &str) -> Option<&str> {
    if host.is_empty() || host.parse::<IpAddr>().is_ok() {
        return None;
    }

    let domain = psl::domain(host.as_bytes())?;
    if !domain.suffix().is_known() {
        return None;
    }

    // The match is always a trailing slice of the host
    let len = domain.as_bytes().len();
    host.get(host.len().checked_sub(len)?..)
}
