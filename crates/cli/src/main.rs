use captive_dns_application::use_cases::RequestOutcome;
use captive_dns_domain::CliOverrides;
use captive_dns_infrastructure::CaptiveDnsServer;
use clap::Parser;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::{debug, info};

mod bootstrap;

#[derive(Parser)]
#[command(name = "captive-dns")]
#[command(version)]
#[command(about = "Captive DNS - catch-all DNS redirection for captive portals")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Domain to redirect ("*" catches every name)
    #[arg(short = 'd', long)]
    domain: Option<String>,

    /// IPv4 address matched queries resolve to
    #[arg(short = 'a', long)]
    address: Option<Ipv4Addr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        domain: cli.domain.clone(),
        address: cli.address,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Captive DNS v{}", env!("CARGO_PKG_VERSION"));

    let bind_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.port).parse()?;

    let mut server = CaptiveDnsServer::start(
        bind_addr,
        &config.redirect.domain,
        config.redirect.address,
        config.redirect.strip_www_prefix,
    )?;
    server.set_ttl(config.redirect.ttl);
    server.set_error_reply_code(config.redirect.error_reply_code);

    let mut tick = tokio::time::interval(Duration::from_millis(config.server.poll_interval_ms));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tick.tick() => drain_requests(&mut server),
        }
    }

    info!("Shutting down");
    server.stop();
    Ok(())
}

/// Processes everything pending on the socket, answering each matched query
/// with the configured address.
fn drain_requests(server: &mut CaptiveDnsServer) {
    loop {
        match server.process_one_request() {
            RequestOutcome::NoActivity => break,
            RequestOutcome::HandledInternally => {}
            RequestOutcome::Matched(domain) => {
                debug!(domain = %domain, "Answering with configured address");
                server.reply_with_default();
            }
        }
    }
}
