use std::net::Ipv4Addr;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leasebind::{BasicHost, ClientConfig, LeaseEngine, LeaseEvent, LeaseModule, Value};

/// Dry-run harness: constructs the DHCP lease module against a simulated
/// engine and prints every exported variable.
#[derive(Parser)]
#[command(name = "leasebind")]
#[command(author, version, about = "DHCP lease module dry-run harness", long_about = None)]
struct Cli {
    /// Interface name passed to the module.
    ifname: String,

    /// Option list as JSON, e.g. '["hostname","webby","auto_clientid"]'.
    opts: Option<String>,

    #[arg(long, default_value = "192.168.1.10")]
    addr: Ipv4Addr,

    #[arg(long, default_value = "255.255.255.0")]
    mask: Ipv4Addr,

    #[arg(long)]
    gateway: Option<Ipv4Addr>,

    #[arg(long = "dns")]
    dns_servers: Vec<Ipv4Addr>,

    #[arg(long, default_value = "AB:CD:EF:01:02:03", value_parser = parse_mac)]
    server_mac: [u8; 6],

    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn parse_mac(text: &str) -> Result<[u8; 6], String> {
    let octets: Vec<&str> = text.split(':').collect();
    if octets.len() != 6 {
        return Err(format!("expected 6 colon-separated octets, got {}", octets.len()));
    }
    let mut mac = [0u8; 6];
    for (slot, octet) in mac.iter_mut().zip(&octets) {
        *slot = u8::from_str_radix(octet, 16).map_err(|e| format!("bad octet {:?}: {}", octet, e))?;
    }
    Ok(mac)
}

struct SimulatedEngine {
    addr: Ipv4Addr,
    mask: Ipv4Addr,
    gateway: Option<Ipv4Addr>,
    dns_servers: Vec<Ipv4Addr>,
    server_mac: [u8; 6],
}

impl LeaseEngine for SimulatedEngine {
    fn client_addr(&self) -> Ipv4Addr {
        self.addr
    }

    fn client_mask(&self) -> Ipv4Addr {
        self.mask
    }

    fn router(&self) -> Option<Ipv4Addr> {
        self.gateway
    }

    fn dns_servers(&self, max: usize) -> Vec<Ipv4Addr> {
        self.dns_servers.iter().copied().take(max).collect()
    }

    fn server_mac(&self) -> [u8; 6] {
        self.server_mac
    }

    fn stop(&mut self) {
        info!("simulated engine stopped");
    }
}

const VARIABLES: [&str; 6] = [
    "addr",
    "prefix",
    "cidr_addr",
    "gateway",
    "dns_servers",
    "server_mac",
];

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::List(items) => {
            let rendered: Vec<String> = items.iter().map(render).collect();
            format!("[{}]", rendered.join(", "))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let mut args = vec![Value::from(cli.ifname.as_str())];
    if let Some(opts) = &cli.opts {
        args.push(serde_json::from_str(opts)?);
    }

    let starter = |config: &ClientConfig| {
        info!(
            "starting simulated DHCP client on {} (hostname={:?}, vendorclassid={:?}, auto_clientid={})",
            config.interface, config.hostname, config.vendor_class_id, config.auto_client_id
        );
        Ok(SimulatedEngine {
            addr: cli.addr,
            mask: cli.mask,
            gateway: cli.gateway,
            dns_servers: cli.dns_servers.clone(),
            server_mac: cli.server_mac,
        })
    };

    let mut host = BasicHost::new(&cli.ifname);
    let mut module = LeaseModule::new(&args, starter, &mut host)?;

    module.handle_event(LeaseEvent::Acquired, &mut host);

    for name in VARIABLES {
        match module.get_var(name, &mut host) {
            Ok(Some(value)) => println!("{} = {}", name, render(&value)),
            Ok(None) => unreachable!("exported variable {} missing", name),
            Err(error) => println!("{} unavailable: {}", name, error),
        }
    }

    module.die(&mut host);
    Ok(())
}
