//! Boundary to the external DHCP client engine.
//!
//! The engine owns the wire protocol and all lease timing; this crate only
//! starts it, stops it, reads its current lease facts, and reacts to the
//! events it delivers. The host runtime's reactor serializes event delivery,
//! so implementations never call back concurrently.

use std::net::Ipv4Addr;

use crate::config::ClientConfig;
use crate::error::Result;

/// Fixed maximum number of DNS servers read from a lease.
pub const MAX_DNS_SERVERS: usize = 16;

/// Lease lifecycle events delivered by the engine.
///
/// The engine never emits `Acquired` while the lease is already held, nor
/// `Lost` while it is not. Delivery stops permanently once the engine has
/// been stopped or has reported `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseEvent {
    /// A lease was obtained, or re-obtained after a loss.
    Acquired,
    /// The lease expired and could not be renewed.
    Lost,
    /// Unrecoverable engine failure.
    Failed,
}

/// A running DHCP client engine instance.
///
/// The lease-fact getters are valid only while a lease is held (between an
/// [`Acquired`](LeaseEvent::Acquired) and the next
/// [`Lost`](LeaseEvent::Lost) or [`Failed`](LeaseEvent::Failed)).
pub trait LeaseEngine {
    /// The address assigned by the server.
    fn client_addr(&self) -> Ipv4Addr;

    /// The subnet mask assigned by the server.
    ///
    /// Servers can hand out garbage; callers must validate before deriving
    /// a prefix length from it.
    fn client_mask(&self) -> Ipv4Addr;

    /// The default router, if the server supplied one.
    fn router(&self) -> Option<Ipv4Addr>;

    /// Up to `max` DNS servers, in the order the server listed them.
    fn dns_servers(&self, max: usize) -> Vec<Ipv4Addr>;

    /// MAC address of the DHCP server that granted the lease.
    fn server_mac(&self) -> [u8; 6];

    /// Stops the engine. No further events are delivered after this returns.
    fn stop(&mut self);
}

/// Starts an engine instance for a parsed [`ClientConfig`].
///
/// Concrete starters capture whatever scheduling and randomness handles the
/// underlying engine needs; this crate never touches those itself. Failure
/// surfaces as [`Error::EngineInit`](crate::Error::EngineInit).
pub trait EngineStarter {
    type Engine: LeaseEngine;

    fn start(self, config: &ClientConfig) -> Result<Self::Engine>;
}

impl<E: LeaseEngine, F> EngineStarter for F
where
    F: FnOnce(&ClientConfig) -> Result<E>,
{
    type Engine = E;

    fn start(self, config: &ClientConfig) -> Result<E> {
        self(config)
    }
}
