//! Capabilities the host runtime lends to a module instance.
//!
//! The module never touches the runtime's internals directly; everything it
//! needs from its surroundings arrives through [`ModuleHost`], passed into
//! each entry point. Keeping the host behind a trait lets the lifecycle
//! controller and the attribute projector run against recording fakes in
//! tests.

use tracing::info;

use crate::error::Result;
use crate::value::Value;

/// Signals and value allocation provided by the surrounding runtime.
pub trait ModuleHost {
    /// The instance's address is now considered configured.
    fn signal_up(&mut self);

    /// The lease was lost; the instance is no longer up.
    fn signal_down(&mut self);

    /// The instance failed and is about to be destroyed.
    fn signal_error(&mut self);

    /// The instance has been torn down; the runtime may reclaim it.
    fn signal_dead(&mut self);

    /// Allocates a string value in the runtime's value memory.
    ///
    /// Fails with [`Error::Allocation`] when the runtime cannot allocate.
    fn new_string(&mut self, value: String) -> Result<Value>;

    /// Allocates a list value in the runtime's value memory.
    fn new_list(&mut self, items: Vec<Value>) -> Result<Value>;
}

/// A host with infallible in-process allocation and logged signals.
///
/// Suitable for the CLI harness and for embedding outside a full runtime.
#[derive(Debug, Default)]
pub struct BasicHost {
    name: String,
}

impl BasicHost {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ModuleHost for BasicHost {
    fn signal_up(&mut self) {
        info!("{}: up", self.name);
    }

    fn signal_down(&mut self) {
        info!("{}: down", self.name);
    }

    fn signal_error(&mut self) {
        info!("{}: error", self.name);
    }

    fn signal_dead(&mut self) {
        info!("{}: dead", self.name);
    }

    fn new_string(&mut self, value: String) -> Result<Value> {
        Ok(Value::String(value))
    }

    fn new_list(&mut self, items: Vec<Value>) -> Result<Value> {
        Ok(Value::List(items))
    }
}
