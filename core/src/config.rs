use crate::{
	address::attach_port_if_missing,
	error::{BuildError, Error, Stage, StageContext},
	local::{local_names, LocalNetwork, SystemNetwork},
	resolve::{Resolve, SystemResolver},
	types::NameSet,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// List of hosts given either as a DNS record or as a static list of names.
///
/// If present, the DNS record always takes precedence over the static list.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HostListConfig {
	/// DNS record from which to resolve host names (default: empty, unset).
	pub dns: String,
	/// Statically configured `host` or `host:port` names, used only when `dns` is empty (default: empty).
	#[serde(rename = "static")]
	pub static_hosts: Vec<String>,
}

impl HostListConfig {
	pub fn from_dns(record: &str) -> Self {
		HostListConfig {
			dns: record.to_string(),
			static_hosts: vec![],
		}
	}

	pub fn from_static<S: Into<String>>(hosts: impl IntoIterator<Item = S>) -> Self {
		HostListConfig {
			dns: String::new(),
			static_hosts: hosts.into_iter().map(Into::into).collect(),
		}
	}

	/// Resolves the configuration into a set of `ip:port` or `host:port` endpoints.
	///
	/// Names without a port get `port` attached, names with a port are kept.
	/// The local machine, identified both by its hostname and by its
	/// non-loopback IPv4 addresses, is removed from the result. An empty result
	/// is valid (single node), while a DNS record resolving to nothing is an
	/// error.
	pub fn build(&self, port: u16) -> Result<NameSet, BuildError> {
		self.build_with(port, &SystemResolver, &SystemNetwork)
	}

	/// Same as [`HostListConfig::build`], with the resolver and the local network provided.
	pub fn build_with(
		&self,
		port: u16,
		resolver: &impl Resolve,
		network: &impl LocalNetwork,
	) -> Result<NameSet, BuildError> {
		let names = self.resolve(resolver).stage(Stage::Resolve)?;
		let addrs = attach_port_if_missing(&names, port).stage(Stage::AttachPortToResolved)?;
		let local_names = local_names(network).stage(Stage::LocalNames)?;
		let local_addrs =
			attach_port_if_missing(&local_names, port).stage(Stage::AttachPortToLocal)?;

		let peers: NameSet = addrs.difference(&local_addrs).cloned().collect();
		info!(
			resolved = addrs.len(),
			excluded = addrs.len() - peers.len(),
			peers = peers.len(),
			"Host list built"
		);
		Ok(peers)
	}

	/// Returns raw names from the DNS record, or from the static list if no record is set.
	pub fn resolve(&self, resolver: &impl Resolve) -> Result<NameSet, Error> {
		if self.dns.is_empty() {
			debug!(hosts = self.static_hosts.len(), "Using static host list");
			return Ok(self.static_hosts.iter().cloned().collect());
		}

		let addrs = resolver
			.lookup_host(&self.dns)
			.map_err(|source| Error::Resolution {
				record: self.dns.clone(),
				source,
			})?;
		if addrs.is_empty() {
			return Err(Error::EmptyResult {
				record: self.dns.clone(),
			});
		}

		debug!(record = %self.dns, addrs = addrs.len(), "Using DNS host list");
		Ok(addrs.iter().map(ToString::to_string).collect())
	}
}
