//! Attribute projection: derives the module's exported variables from the
//! engine's current lease facts.
//!
//! Each lookup reads the engine's live state at call time, so after a lease
//! is lost and re-acquired the projections reflect the newest lease with no
//! caching to invalidate. Lookups are only meaningful while the lease is
//! held; the lifecycle controller enforces that.

use std::net::Ipv4Addr;

use tracing::error;

use crate::engine::{LeaseEngine, MAX_DNS_SERVERS};
use crate::error::{Error, Result};
use crate::host::ModuleHost;
use crate::value::Value;

/// Derives the prefix length from a subnet mask.
///
/// Valid masks are a contiguous run of leading one bits, so `/0` through
/// `/32` are all accepted. Returns `None` for masks with holes, which DHCP
/// servers do occasionally hand out.
pub fn mask_to_prefix(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    if bits.count_ones() == bits.leading_ones() {
        Some(bits.leading_ones() as u8)
    } else {
        None
    }
}

/// Formats a MAC address as six upper-case hex octets separated by colons.
pub fn format_mac(mac: &[u8; 6]) -> String {
    format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}

fn valid_prefix(engine: &impl LeaseEngine, interface: &str) -> Result<u8> {
    let mask = engine.client_mask();
    mask_to_prefix(mask).ok_or_else(|| {
        error!("{}: bad netmask {}", interface, mask);
        Error::InvalidMask(mask)
    })
}

fn alloc_string(host: &mut impl ModuleHost, interface: &str, value: String) -> Result<Value> {
    host.new_string(value).map_err(|err| {
        error!("{}: string allocation failed", interface);
        err
    })
}

/// Resolves one exported variable by name.
///
/// Returns `Ok(None)` for names this module does not export. Failed
/// derivations (`InvalidMask`, `Allocation`) are logged here and surface as
/// errors local to this lookup; the instance itself stays up.
pub(crate) fn lookup<E: LeaseEngine>(
    engine: &E,
    interface: &str,
    name: &str,
    host: &mut impl ModuleHost,
) -> Result<Option<Value>> {
    match name {
        "addr" => {
            let addr = engine.client_addr();
            alloc_string(host, interface, addr.to_string()).map(Some)
        }
        "prefix" => {
            let prefix = valid_prefix(engine, interface)?;
            alloc_string(host, interface, prefix.to_string()).map(Some)
        }
        "cidr_addr" => {
            let prefix = valid_prefix(engine, interface)?;
            let cidr = format!("{}/{}", engine.client_addr(), prefix);
            alloc_string(host, interface, cidr).map(Some)
        }
        "gateway" => {
            let gateway = match engine.router() {
                Some(router) => router.to_string(),
                None => "none".to_string(),
            };
            alloc_string(host, interface, gateway).map(Some)
        }
        "dns_servers" => {
            let servers = engine.dns_servers(MAX_DNS_SERVERS);
            let mut items = Vec::with_capacity(servers.len());
            for server in servers {
                items.push(alloc_string(host, interface, server.to_string())?);
            }
            host.new_list(items)
                .map_err(|err| {
                    error!("{}: list allocation failed", interface);
                    err
                })
                .map(Some)
        }
        "server_mac" => {
            let mac = format_mac(&engine.server_mac());
            alloc_string(host, interface, mac).map(Some)
        }
        _ => Ok(None),
    }
}
