use clap::Parser;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(version)]
pub struct CliOpts {
	/// Path to the toml configuration file
	#[arg(short, long, value_name = "FILE")]
	pub config: Option<String>,
	/// Port attached to hosts configured without one
	#[arg(short, long)]
	pub port: Option<u16>,
	/// DNS record to resolve peers from, takes precedence over static hosts
	#[arg(long)]
	pub dns: Option<String>,
	/// Static peer host, `host` or `host:port` (repeatable, replaces configured list)
	#[arg(long = "static", value_name = "HOST")]
	pub static_hosts: Vec<String>,
	/// Log level
	#[arg(long)]
	pub verbosity: Option<Level>,
	/// Set logs format to JSON
	#[arg(long)]
	pub logs_json: bool,
	/// Print peers as a JSON array
	#[arg(long)]
	pub json: bool,
}
