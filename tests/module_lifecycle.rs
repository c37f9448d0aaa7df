//! End-to-end lifecycle tests driving the public API with a fake engine and
//! a recording host.

use std::cell::RefCell;
use std::net::Ipv4Addr;
use std::rc::Rc;

use leasebind::{
    ClientConfig, ComponentState, Error, LeaseEngine, LeaseEvent, LeaseModule, ModuleHost, Result,
    Value,
};

#[derive(Debug, Clone)]
struct Facts {
    addr: Ipv4Addr,
    mask: Ipv4Addr,
    router: Option<Ipv4Addr>,
    dns: Vec<Ipv4Addr>,
    server: [u8; 6],
    stop_count: usize,
}

impl Default for Facts {
    fn default() -> Self {
        Self {
            addr: Ipv4Addr::new(192, 168, 1, 10),
            mask: Ipv4Addr::new(255, 255, 255, 0),
            router: None,
            dns: Vec::new(),
            server: [0xAB, 0xCD, 0xEF, 0x01, 0x02, 0x03],
            stop_count: 0,
        }
    }
}

struct FakeEngine {
    facts: Rc<RefCell<Facts>>,
}

impl LeaseEngine for FakeEngine {
    fn client_addr(&self) -> Ipv4Addr {
        self.facts.borrow().addr
    }
    fn client_mask(&self) -> Ipv4Addr {
        self.facts.borrow().mask
    }
    fn router(&self) -> Option<Ipv4Addr> {
        self.facts.borrow().router
    }
    fn dns_servers(&self, max: usize) -> Vec<Ipv4Addr> {
        self.facts.borrow().dns.iter().copied().take(max).collect()
    }
    fn server_mac(&self) -> [u8; 6] {
        self.facts.borrow().server
    }
    fn stop(&mut self) {
        self.facts.borrow_mut().stop_count += 1;
    }
}

/// Records every signal in delivery order.
#[derive(Debug, Default)]
struct RecordingHost {
    signals: Vec<&'static str>,
}

impl ModuleHost for RecordingHost {
    fn signal_up(&mut self) {
        self.signals.push("up");
    }
    fn signal_down(&mut self) {
        self.signals.push("down");
    }
    fn signal_error(&mut self) {
        self.signals.push("error");
    }
    fn signal_dead(&mut self) {
        self.signals.push("dead");
    }
    fn new_string(&mut self, value: String) -> Result<Value> {
        Ok(Value::String(value))
    }
    fn new_list(&mut self, items: Vec<Value>) -> Result<Value> {
        Ok(Value::List(items))
    }
}

fn start_module(
    facts: &Rc<RefCell<Facts>>,
    host: &mut RecordingHost,
) -> LeaseModule<FakeEngine> {
    let engine_facts = Rc::clone(facts);
    let starter = move |_config: &ClientConfig| Ok(FakeEngine { facts: engine_facts });
    LeaseModule::new(&[Value::from("eth0")], starter, host).unwrap()
}

fn get_string(module: &LeaseModule<FakeEngine>, host: &mut RecordingHost, name: &str) -> String {
    match module.get_var(name, host).unwrap().unwrap() {
        Value::String(s) => s,
        other => panic!("expected string for {}, got {:?}", name, other),
    }
}

#[test]
fn comes_up_only_on_lease_acquisition() {
    let facts = Rc::new(RefCell::new(Facts::default()));
    let mut host = RecordingHost::default();
    let mut module = start_module(&facts, &mut host);

    assert_eq!(module.state(), ComponentState::Initializing);
    assert!(host.signals.is_empty());

    module.handle_event(LeaseEvent::Acquired, &mut host);
    assert_eq!(module.state(), ComponentState::Up);
    assert_eq!(host.signals, vec!["up"]);
}

#[test]
fn full_lease_cycle_reflects_latest_facts() {
    let facts = Rc::new(RefCell::new(Facts {
        router: Some(Ipv4Addr::new(192, 168, 1, 1)),
        dns: vec![Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)],
        ..Facts::default()
    }));
    let mut host = RecordingHost::default();
    let mut module = start_module(&facts, &mut host);

    module.handle_event(LeaseEvent::Acquired, &mut host);
    assert_eq!(get_string(&module, &mut host, "addr"), "192.168.1.10");
    assert_eq!(get_string(&module, &mut host, "prefix"), "24");
    assert_eq!(get_string(&module, &mut host, "cidr_addr"), "192.168.1.10/24");
    assert_eq!(get_string(&module, &mut host, "gateway"), "192.168.1.1");
    assert_eq!(get_string(&module, &mut host, "server_mac"), "AB:CD:EF:01:02:03");
    assert_eq!(
        module.get_var("dns_servers", &mut host).unwrap().unwrap(),
        Value::List(vec![Value::from("8.8.8.8"), Value::from("8.8.4.4")])
    );

    // Lease expires, then the engine re-acquires different facts.
    module.handle_event(LeaseEvent::Lost, &mut host);
    {
        let mut facts = facts.borrow_mut();
        facts.addr = Ipv4Addr::new(10, 0, 0, 42);
        facts.mask = Ipv4Addr::new(255, 255, 0, 0);
        facts.router = None;
        facts.dns.clear();
    }
    module.handle_event(LeaseEvent::Acquired, &mut host);

    assert_eq!(get_string(&module, &mut host, "addr"), "10.0.0.42");
    assert_eq!(get_string(&module, &mut host, "cidr_addr"), "10.0.0.42/16");
    assert_eq!(get_string(&module, &mut host, "gateway"), "none");
    assert_eq!(
        module.get_var("dns_servers", &mut host).unwrap().unwrap(),
        Value::List(vec![])
    );
    assert_eq!(host.signals, vec!["up", "down", "up"]);
}

#[test]
fn unknown_variable_is_not_an_error() {
    let facts = Rc::new(RefCell::new(Facts::default()));
    let mut host = RecordingHost::default();
    let mut module = start_module(&facts, &mut host);
    module.handle_event(LeaseEvent::Acquired, &mut host);

    assert!(module.get_var("lease_time", &mut host).unwrap().is_none());
}

#[test]
fn invalid_mask_only_breaks_prefix_derivations() {
    let facts = Rc::new(RefCell::new(Facts {
        mask: Ipv4Addr::new(255, 0, 255, 0),
        ..Facts::default()
    }));
    let mut host = RecordingHost::default();
    let mut module = start_module(&facts, &mut host);
    module.handle_event(LeaseEvent::Acquired, &mut host);

    assert!(matches!(
        module.get_var("prefix", &mut host),
        Err(Error::InvalidMask(_))
    ));
    assert!(matches!(
        module.get_var("cidr_addr", &mut host),
        Err(Error::InvalidMask(_))
    ));
    assert_eq!(get_string(&module, &mut host, "addr"), "192.168.1.10");
    assert_eq!(get_string(&module, &mut host, "gateway"), "none");
    assert_eq!(module.state(), ComponentState::Up);
}

#[test]
fn fatal_error_tears_down_exactly_once() {
    for warmup in [Vec::new(), vec![LeaseEvent::Acquired], vec![
        LeaseEvent::Acquired,
        LeaseEvent::Lost,
    ]] {
        let facts = Rc::new(RefCell::new(Facts::default()));
        let mut host = RecordingHost::default();
        let mut module = start_module(&facts, &mut host);

        for event in warmup {
            module.handle_event(event, &mut host);
        }
        module.handle_event(LeaseEvent::Failed, &mut host);

        assert_eq!(module.state(), ComponentState::Dead);
        assert_eq!(facts.borrow().stop_count, 1);
        assert_eq!(
            host.signals.iter().filter(|s| **s == "dead").count(),
            1,
            "exactly one destruction signal"
        );
        let tail = &host.signals[host.signals.len() - 2..];
        assert_eq!(tail, ["error", "dead"]);
    }
}

#[test]
fn runtime_teardown_works_in_every_live_state() {
    for warmup in [Vec::new(), vec![LeaseEvent::Acquired], vec![
        LeaseEvent::Acquired,
        LeaseEvent::Lost,
    ]] {
        let facts = Rc::new(RefCell::new(Facts::default()));
        let mut host = RecordingHost::default();
        let mut module = start_module(&facts, &mut host);

        for event in warmup {
            module.handle_event(event, &mut host);
        }
        module.die(&mut host);

        assert_eq!(module.state(), ComponentState::Dead);
        assert_eq!(facts.borrow().stop_count, 1);
        assert_eq!(host.signals.last(), Some(&"dead"));
        assert_eq!(host.signals.iter().filter(|s| **s == "error").count(), 0);
    }
}

#[test]
fn construction_failure_signals_error_then_dead() {
    let mut host = RecordingHost::default();
    let starter = |_config: &ClientConfig| -> Result<FakeEngine> {
        panic!("starter must not run");
    };
    let args = [Value::from("eth0"), Value::from("not-a-list")];

    let result = LeaseModule::new(&args, starter, &mut host);
    assert!(matches!(result, Err(Error::WrongType(_))));
    assert_eq!(host.signals, vec!["error", "dead"]);
}

#[test]
fn engine_init_failure_signals_error_then_dead() {
    let mut host = RecordingHost::default();
    let starter = |_config: &ClientConfig| -> Result<FakeEngine> {
        Err(Error::EngineInit("interface vanished".to_string()))
    };

    let result = LeaseModule::new(&[Value::from("eth0")], starter, &mut host);
    assert!(matches!(result, Err(Error::EngineInit(_))));
    assert_eq!(host.signals, vec!["error", "dead"]);
}

#[test]
#[should_panic(expected = "variable read while not up")]
fn variable_read_before_up_is_a_contract_violation() {
    let facts = Rc::new(RefCell::new(Facts::default()));
    let mut host = RecordingHost::default();
    let module = start_module(&facts, &mut host);
    let _ = module.get_var("addr", &mut host);
}
