use clap::Parser;
use cli::CliOpts;
use color_eyre::{
	eyre::{eyre, WrapErr},
	Result,
};
use config::RuntimeConfig;
use hostlist_core::{
	utils::{default_subscriber, install_panic_hooks, json_subscriber},
	NameSet,
};
use tokio::{task, time};
use tokio_retry::Retry;
use tracing::{error, info, warn};

mod cli;
mod config;

/// Runs a single `build` on the blocking pool, abandoned after `resolve_timeout`.
async fn build_once(cfg: &RuntimeConfig) -> Result<NameSet> {
	let hosts = cfg.hosts.clone();
	let port = cfg.port;
	let attempt = task::spawn_blocking(move || hosts.build(port));

	match time::timeout(cfg.resolve_timeout, attempt).await {
		Ok(joined) => Ok(joined.wrap_err("Host list resolution task failed")??),
		Err(_) => Err(eyre!(
			"Host list resolution timed out after {:?}",
			cfg.resolve_timeout
		)),
	}
}

fn render(peers: &NameSet, json: bool) -> Result<String> {
	let mut peers: Vec<&String> = peers.iter().collect();
	peers.sort();
	if json {
		return serde_json::to_string(&peers).wrap_err("Unable to serialize peers");
	}
	Ok(peers
		.iter()
		.map(|peer| peer.as_str())
		.collect::<Vec<_>>()
		.join("\n"))
}

async fn run(cfg: RuntimeConfig) -> Result<()> {
	let version = clap::crate_version!();
	info!(version, "Running {}", clap::crate_name!());
	info!("Using config: {:?}", cfg);

	let cfg_ref = &cfg;
	let peers = Retry::spawn(cfg.retry.clone(), || async move {
		build_once(cfg_ref).await.map_err(|error| {
			warn!("Peer discovery unavailable: {error:#}");
			error
		})
	})
	.await?;

	if peers.is_empty() {
		info!("No peers besides the local machine");
	}

	let output = render(&peers, cfg.output_format_json)?;
	if !output.is_empty() {
		println!("{output}");
	}
	Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
	let opts = CliOpts::parse();
	let cfg = config::load(&opts)?;

	if cfg.log_format_json {
		tracing::subscriber::set_global_default(json_subscriber(cfg.log_level))?;
	} else {
		tracing::subscriber::set_global_default(default_subscriber(cfg.log_level))?;
	};

	install_panic_hooks()?;

	if let Err(error) = run(cfg).await {
		error!("{error:#}");
		return Err(error.wrap_err("Resolving host list failed"));
	};

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn peers(names: &[&str]) -> NameSet {
		names.iter().map(|name| name.to_string()).collect()
	}

	#[test]
	fn renders_sorted_lines() {
		let output = render(&peers(&["node-2:7000", "10.0.0.1:7000", "node-1:7000"]), false);
		assert_eq!(output.unwrap(), "10.0.0.1:7000\nnode-1:7000\nnode-2:7000");
	}

	#[test]
	fn renders_json_array() {
		let output = render(&peers(&["node-2:7000", "node-1:7000"]), true);
		assert_eq!(output.unwrap(), r#"["node-1:7000","node-2:7000"]"#);
	}

	#[test]
	fn renders_empty_set() {
		assert_eq!(render(&NameSet::new(), false).unwrap(), "");
		assert_eq!(render(&NameSet::new(), true).unwrap(), "[]");
	}

	#[tokio::test]
	async fn builds_static_list_on_blocking_pool() {
		let mut cfg = RuntimeConfig::default();
		cfg.hosts.static_hosts = vec!["192.0.2.10".to_string(), "192.0.2.11:9000".to_string()];
		let peers = build_once(&cfg).await.unwrap();
		assert_eq!(peers, self::peers(&["192.0.2.10:7000", "192.0.2.11:9000"]));
	}

	#[tokio::test]
	async fn malformed_entry_is_reported_with_stage() {
		let mut cfg = RuntimeConfig::default();
		cfg.hosts.static_hosts = vec!["a:b:c".to_string()];
		let error = build_once(&cfg).await.unwrap_err();
		assert!(format!("{error:#}").starts_with("attach port to resolved names"));
	}
}
