//! Error types for the lease module.
//!
//! All fallible operations in this crate return [`Result<T>`], which uses
//! the [`Error`] enum for error variants.

use std::net::Ipv4Addr;

/// Errors that can occur while constructing or querying a lease module.
///
/// Construction-time variants (`WrongArity` through `UnknownOption`) and
/// [`EngineInit`](Self::EngineInit) are fatal to the instance: no engine is
/// left running and the instance signals error then dead. The lookup-time
/// variants [`InvalidMask`](Self::InvalidMask) and
/// [`Allocation`](Self::Allocation) are local to a single attribute lookup;
/// the instance stays up.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The argument list had the wrong number of entries.
    ///
    /// The module takes exactly one argument (the interface name) or two
    /// (interface name plus an option list).
    #[error("wrong arity: expected 1 or 2 arguments, got {0}")]
    WrongArity(usize),

    /// An argument or option value had the wrong type.
    ///
    /// Includes strings containing embedded null bytes, which cannot be
    /// passed through to the engine.
    #[error("wrong type: {0}")]
    WrongType(&'static str),

    /// An option-list token in name position was not a string.
    #[error("wrong option name type at index {0}")]
    WrongOptionNameType(usize),

    /// A value-taking option appeared as the last token of the option list.
    #[error("missing value for option {0:?}")]
    MissingOptionValue(String),

    /// An option name not in the supported set.
    #[error("unknown option {0:?}")]
    UnknownOption(String),

    /// The external DHCP client engine could not be started.
    #[error("DHCP engine failed to start: {0}")]
    EngineInit(String),

    /// The lease's subnet mask is not a contiguous run of leading one bits.
    ///
    /// `prefix` and `cidr_addr` lookups fail with this; `addr` and `gateway`
    /// are unaffected.
    #[error("invalid subnet mask {0}")]
    InvalidMask(Ipv4Addr),

    /// The host runtime failed to allocate an output value.
    #[error("host value allocation failed")]
    Allocation,
}

/// A specialized Result type for lease module operations.
pub type Result<T> = std::result::Result<T, Error>;
