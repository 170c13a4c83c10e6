use crate::cli::CliOpts;
use color_eyre::{eyre::WrapErr, Result};
use hostlist_core::{
	types::{duration_millis_format, duration_seconds_format, tracing_level_format},
	HostListConfig,
};
use serde::{Deserialize, Serialize};
use std::{fs, time::Duration};
use tokio_retry::strategy::{jitter, ExponentialBackoff, FibonacciBackoff};
use tracing::Level;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RuntimeConfig {
	/// Log level, default is `INFO`. See `<https://docs.rs/log/0.4.14/log/enum.LevelFilter.html>` for possible log level values. (default: `INFO`).
	#[serde(with = "tracing_level_format")]
	pub log_level: Level,
	/// If set to true, logs are displayed in JSON format, which is used for structured logging. Otherwise, plain text format is used (default: false).
	pub log_format_json: bool,
	/// Port attached to configured hosts which have none (default: 7000).
	pub port: u16,
	/// Either `dns` record or `static` list of hosts. If both are set, DNS record is used.
	#[serde(flatten)]
	pub hosts: HostListConfig,
	/// Time in seconds after which a single resolution attempt is abandoned (default: 10).
	#[serde(with = "duration_seconds_format")]
	pub resolve_timeout: Duration,
	/// Backoff between failed resolution attempts.
	/// (default:
	/// exponential:
	///     base: 1,
	///     max_delay: 10000,
	///     retries: 3,
	/// )
	pub retry: RetryConfig,
	/// If set to true, peers are printed as a JSON array, otherwise one per line (default: false).
	pub output_format_json: bool,
}

impl Default for RuntimeConfig {
	fn default() -> Self {
		RuntimeConfig {
			log_level: Level::INFO,
			log_format_json: false,
			port: 7000,
			hosts: HostListConfig::default(),
			resolve_timeout: Duration::from_secs(10),
			retry: RetryConfig::Exponential(ExponentialConfig {
				base: 1,
				max_delay: Duration::from_millis(10000),
				retries: 3,
			}),
			output_format_json: false,
		}
	}
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum RetryConfig {
	#[serde(rename = "exponential")]
	Exponential(ExponentialConfig),

	#[serde(rename = "fibonacci")]
	Fibonacci(FibonacciConfig),
}

impl IntoIterator for RetryConfig {
	type Item = Duration;
	type IntoIter = std::vec::IntoIter<Self::Item>;

	fn into_iter(self) -> Self::IntoIter {
		let delays: Vec<Duration> = match self {
			RetryConfig::Exponential(config) => ExponentialBackoff::from_millis(config.base)
				.factor(1000)
				.max_delay(config.max_delay)
				.map(jitter)
				.take(config.retries)
				.collect(),
			RetryConfig::Fibonacci(config) => FibonacciBackoff::from_millis(config.base)
				.factor(1000)
				.max_delay(config.max_delay)
				.map(jitter)
				.take(config.retries)
				.collect(),
		};
		delays.into_iter()
	}
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExponentialConfig {
	pub base: u64,
	#[serde(with = "duration_millis_format")]
	pub max_delay: Duration,
	pub retries: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FibonacciConfig {
	pub base: u64,
	#[serde(with = "duration_millis_format")]
	pub max_delay: Duration,
	pub retries: usize,
}

pub fn load(opts: &CliOpts) -> Result<RuntimeConfig> {
	let mut cfg: RuntimeConfig = match &opts.config {
		Some(path) => {
			fs::metadata(path).wrap_err(format!("Configuration file not found: {path}"))?;
			confy::load_path(path)
				.wrap_err(format!("Failed to load configuration from: {path}"))?
		},
		None => RuntimeConfig::default(),
	};

	cfg.log_level = opts.verbosity.unwrap_or(cfg.log_level);
	cfg.log_format_json = opts.logs_json || cfg.log_format_json;
	cfg.output_format_json = opts.json || cfg.output_format_json;

	if let Some(port) = opts.port {
		cfg.port = port;
	}

	if let Some(dns) = &opts.dns {
		cfg.hosts.dns = dns.clone();
	}

	if !opts.static_hosts.is_empty() {
		cfg.hosts.static_hosts = opts.static_hosts.clone();
	}

	Ok(cfg)
}
