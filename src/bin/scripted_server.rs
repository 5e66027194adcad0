use anyhow::{Context, Result};
use clap::Parser;
use vessel_poller::{Position, Script, ScriptedServer, DEFAULT_ADDRESS, DEFAULT_RPC_PORT};

/// Serves a scripted straight-line trajectory for `vessel_poller` to poll.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	#[arg(long, default_value = DEFAULT_ADDRESS)]
	address: String,
	#[arg(long, default_value_t = DEFAULT_RPC_PORT)]
	port: u16,
	/// Number of scripted positions
	#[arg(long, default_value_t = 10)]
	positions: usize,
	/// Fail position queries once the script runs out instead of repeating it
	#[arg(long)]
	fail_after: bool,
}

fn main() -> Result<()> {
	env_logger::init();
	let args = Args::parse();

	let positions = (0..args.positions)
		.map(|i| Position::new(600_000.0 + i as f64 * 100.0, 0.0, i as f64 * 2.5))
		.collect();
	let script = Script::new(positions);
	let script = if args.fail_after { script } else { script.repeating() };

	let server = ScriptedServer::bind((args.address.as_str(), args.port), script)
		.with_context(|| format!("failed to bind {}:{}", args.address, args.port))?;
	println!("Serving on {}", server.local_addr());

	loop {
		std::thread::park();
	}
}
