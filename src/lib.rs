//! # leasebind
//!
//! Exposes a DHCP client lease as an up/down component with named, read-only
//! variables, for embedding in a declarative orchestration runtime.
//!
//! The module starts an external DHCP client engine on a network interface
//! and tracks the lease lifecycle: it comes up when an address is obtained,
//! goes down when the lease times out, and is destroyed on fatal engine
//! failure. It never assigns the obtained address to the interface, and the
//! interface must already be up.
//!
//! ## Arguments
//!
//! `(ifname [, opts])`, where `opts` is a flat token list:
//!
//! - `"hostname"`, value: send this hostname to the DHCP server
//! - `"vendorclassid"`, value: send this vendor class identifier
//! - `"auto_clientid"`: derive the client identifier from the MAC address
//!
//! ## Variables
//!
//! While the component is up:
//!
//! - `addr` - assigned IP address (`"A.B.C.D"`)
//! - `prefix` - address prefix length (`"N"`)
//! - `cidr_addr` - address and prefix in CIDR notation (`"A.B.C.D/N"`)
//! - `gateway` - router address, or `"none"` if not provided
//! - `dns_servers` - list of DNS server addresses
//! - `server_mac` - MAC address of the DHCP server (`"AB:CD:EF:01:02:03"`)
//!
//! ## Architecture
//!
//! - [`ClientConfig`] - parsed construction arguments
//! - [`LeaseModule`] - the instance: lifecycle state machine and variable lookup
//! - [`LeaseEngine`] / [`EngineStarter`] - boundary to the external DHCP engine
//! - [`ModuleHost`] - signals and value allocation lent by the runtime

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod module;
pub mod value;
pub mod vars;

pub use config::ClientConfig;
pub use engine::{EngineStarter, LeaseEngine, LeaseEvent, MAX_DNS_SERVERS};
pub use error::{Error, Result};
pub use host::{BasicHost, ModuleHost};
pub use module::{ComponentState, LeaseModule};
pub use value::Value;
