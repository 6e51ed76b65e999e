mod hosts;
mod logging;
mod server;

use anyhow::Context;
use clap::Parser;
use dnsd_message::MessageProcessor;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "dnsd", version)]
#[command(about = "Authoritative DNS server answering A queries from a static host table")]
struct Cli {
    /// Append log output to this file instead of writing to stdout
    #[arg(short = 'f', long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Host table, one `address name [alias...]` entry per line
    #[arg(long, value_name = "FILE", default_value = "ip_hosts")]
    hosts: PathBuf,

    /// UDP address to listen on
    #[arg(short = 'b', long, default_value = "0.0.0.0:53")]
    bind: SocketAddr,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref(), &cli.log_level)?;

    let table = hosts::HostTable::from_file(&cli.hosts)
        .with_context(|| format!("could not read host table {}", cli.hosts.display()))?;
    if table.is_empty() {
        warn!("Host table {} has no entries", cli.hosts.display());
    }
    info!("Loaded {} names from {}", table.len(), cli.hosts.display());

    let processor = Arc::new(MessageProcessor::new(table));
    let server = server::Server::bind(cli.bind, processor)
        .await
        .with_context(|| format!("could not bind {}", cli.bind))?;

    info!("Starting name server on {}", server.local_addr()?);

    server.run().await
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["dnsd"]);
        assert_eq!(cli.log_file, None);
        assert_eq!(cli.hosts, PathBuf::from("ip_hosts"));
        assert_eq!(cli.bind, "0.0.0.0:53".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_cli_log_file() {
        let cli = Cli::parse_from(["dnsd", "-f", "/tmp/dnsLog.txt", "-b", "127.0.0.1:8053"]);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/dnsLog.txt")));
        assert_eq!(cli.bind, "127.0.0.1:8053".parse::<SocketAddr>().unwrap());
    }
}
