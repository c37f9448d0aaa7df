//! The lease module instance: lifecycle state machine and entry points.
//!
//! One [`LeaseModule`] owns one engine instance for its whole lifetime. All
//! entry points run on the host runtime's single reactor thread; events,
//! teardown requests, and variable lookups are never delivered concurrently.

use std::fmt;

use tracing::{error, info};

use crate::config::ClientConfig;
use crate::engine::{EngineStarter, LeaseEngine, LeaseEvent};
use crate::error::Result;
use crate::host::ModuleHost;
use crate::value::Value;
use crate::vars;

/// Lifecycle state of a module instance.
///
/// `Down` is only reachable from `Up`; a fresh instance waits in
/// `Initializing` until the first lease arrives. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentState {
    /// Engine started, no lease held yet.
    Initializing,
    /// A lease is held; variables are readable.
    Up,
    /// The lease was lost; waiting for the engine to re-acquire.
    Down,
    /// Torn down, either by the runtime or after a fatal engine error.
    Dead,
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initializing => write!(f, "initializing"),
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Dead => write!(f, "dead"),
        }
    }
}

/// A DHCP lease exposed as an up/down component with named variables.
///
/// Construction parses the argument list, starts the engine, and leaves the
/// instance in [`ComponentState::Initializing`]. From then on the instance
/// is driven entirely by [`handle_event`](Self::handle_event) calls from the
/// reactor, until the runtime requests teardown via [`die`](Self::die) or
/// the engine reports a fatal error.
pub struct LeaseModule<E: LeaseEngine> {
    config: ClientConfig,
    engine: Option<E>,
    state: ComponentState,
}

impl<E: LeaseEngine> LeaseModule<E> {
    /// Creates an instance from the runtime's positional arguments.
    ///
    /// On any failure the instance signals error then dead on the host and
    /// returns the error; no engine is left running. The starter is only
    /// invoked once the arguments have parsed cleanly.
    pub fn new<S>(args: &[Value], starter: S, host: &mut impl ModuleHost) -> Result<Self>
    where
        S: EngineStarter<Engine = E>,
    {
        let result = ClientConfig::from_args(args)
            .and_then(|config| Ok((starter.start(&config)?, config)));

        match result {
            Ok((engine, config)) => {
                info!("{}: DHCP client started", config.interface);
                Ok(Self {
                    config,
                    engine: Some(engine),
                    state: ComponentState::Initializing,
                })
            }
            Err(err) => {
                error!("failed to start DHCP module: {}", err);
                host.signal_error();
                host.signal_dead();
                Err(err)
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ComponentState {
        self.state
    }

    /// The configuration this instance was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Event sink for the engine, dispatched by the reactor.
    ///
    /// The engine contract rules out duplicate `Acquired`, `Lost` without a
    /// held lease, and any event after teardown; violations abort rather
    /// than being papered over.
    pub fn handle_event(&mut self, event: LeaseEvent, host: &mut impl ModuleHost) {
        assert!(
            self.state != ComponentState::Dead,
            "event delivered after teardown"
        );

        match event {
            LeaseEvent::Acquired => {
                assert!(self.state != ComponentState::Up, "duplicate lease acquisition");
                info!("{}: lease acquired", self.config.interface);
                self.state = ComponentState::Up;
                host.signal_up();
            }
            LeaseEvent::Lost => {
                assert!(self.state == ComponentState::Up, "lease lost while not up");
                info!("{}: lease lost", self.config.interface);
                self.state = ComponentState::Down;
                host.signal_down();
            }
            LeaseEvent::Failed => {
                error!("{}: DHCP engine failed", self.config.interface);
                host.signal_error();
                self.teardown(host);
            }
        }
    }

    /// Runtime-requested teardown, valid in any state.
    pub fn die(&mut self, host: &mut impl ModuleHost) {
        info!("{}: stopping DHCP client", self.config.interface);
        self.teardown(host);
    }

    fn teardown(&mut self, host: &mut impl ModuleHost) {
        if self.state == ComponentState::Dead {
            return;
        }
        if let Some(mut engine) = self.engine.take() {
            engine.stop();
        }
        self.state = ComponentState::Dead;
        host.signal_dead();
    }

    /// Looks up one exported variable by name.
    ///
    /// Precondition: the instance is [`Up`](ComponentState::Up); the host
    /// runtime only routes variable reads to components it has seen come up.
    /// Returns `Ok(None)` for names this module does not export.
    pub fn get_var(&self, name: &str, host: &mut impl ModuleHost) -> Result<Option<Value>> {
        assert!(
            self.state == ComponentState::Up,
            "variable read while not up"
        );
        let engine = self.engine.as_ref().expect("up without engine");
        vars::lookup(engine, &self.config.interface, name, host)
    }
}
