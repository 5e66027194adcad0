use anyhow::{Context, Result};
use clap::Parser;
use vessel_poller::{ConnectionConfig, Poller, DEFAULT_ADDRESS, DEFAULT_RPC_PORT};

/// Prints the active vessel's position relative to the body it orbits, forever.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Address of the server
	#[arg(long, default_value = DEFAULT_ADDRESS)]
	address: String,
	/// RPC port of the server
	#[arg(long, default_value_t = DEFAULT_RPC_PORT)]
	port: u16,
	/// Client name shown by the server
	#[arg(long, default_value = "")]
	name: String,
}

fn main() -> Result<()> {
	env_logger::init();
	let args = Args::parse();

	let config = ConnectionConfig {
		name: args.name,
		address: args.address,
		rpc_port: args.port,
	};
	let poller = Poller::connect(&config)
		.with_context(|| format!("could not start polling {}", config.endpoint()))?;

	let stdout = std::io::stdout().lock();
	match poller.run(stdout).context("polling stopped")? {}
}
