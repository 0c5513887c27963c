// ── Derived member addresses ──
//
// A member's RFC4193 and 6PLANE addresses are pure functions of the
// network and node identifiers. They are always computed locally and are
// only live on the member when the network enables the matching mode.

use std::collections::BTreeSet;

use crate::error::CoreError;

const SIX_PLANE_PREFIX: &str = "fd";
const SIX_PLANE_MARKER: &str = "9993";
const RFC4193_PREFIX: &str = "fc";
const RFC4193_SUFFIX: &str = "000000000001";

/// Insert a colon after every fourth character, never after the last one.
///
/// `"fd8056c2e21c"` becomes `"fd80:56c2:e21c"`; a trailing partial group is
/// emitted as-is.
pub fn format_ipv6_groups(hex_digits: &str) -> String {
    let len = hex_digits.chars().count();
    let mut out = String::with_capacity(len + len / 4);
    for (i, c) in hex_digits.chars().enumerate() {
        out.push(c);
        if (i + 1) % 4 == 0 && i + 1 != len {
            out.push(':');
        }
    }
    out
}

/// The member's 6PLANE address.
pub fn six_plane_address(network_id: &str, node_id: &str) -> String {
    format_ipv6_groups(&format!(
        "{SIX_PLANE_PREFIX}{network_id}{SIX_PLANE_MARKER}{node_id}"
    ))
}

/// Fold a 64-bit network id into the 32-bit RFC4193 network mask.
pub fn rfc4193_network_mask(network_id: &str) -> Result<u32, CoreError> {
    let nwid = u64::from_str_radix(network_id, 16).map_err(|_| CoreError::InvalidNetworkId {
        id: network_id.to_owned(),
    })?;
    // Eight bytes always split into two four-byte halves.
    let [a, b, c, d, e, f, g, h] = nwid.to_be_bytes();
    Ok(u32::from_be_bytes([a, b, c, d]) ^ u32::from_be_bytes([e, f, g, h]))
}

/// The member's RFC4193 (ULA) address.
pub fn rfc4193_address(network_id: &str, node_id: &str) -> Result<String, CoreError> {
    let mask = rfc4193_network_mask(network_id)?;
    Ok(format_ipv6_groups(&format!(
        "{RFC4193_PREFIX}{mask:08x}{node_id}{RFC4193_SUFFIX}"
    )))
}

/// Anything with a colon is an IPv6 literal.
pub fn is_ipv6_assignment(address: &str) -> bool {
    address.contains(':')
}

/// Split assigned addresses into `(ipv4, ipv6)` by address family.
///
/// Only covers the assignment pool; derived addresses are never included.
pub fn partition_assignments<'a, I>(assignments: I) -> (BTreeSet<String>, BTreeSet<String>)
where
    I: IntoIterator<Item = &'a String>,
{
    let (v6, v4): (BTreeSet<String>, BTreeSet<String>) = assignments
        .into_iter()
        .cloned()
        .partition(|ip| is_ipv6_assignment(ip));
    (v4, v6)
}
