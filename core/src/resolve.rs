//! DNS lookups against the system resolver.
use mockall::automock;
use std::{
	io,
	net::{IpAddr, ToSocketAddrs},
};
use tracing::debug;

#[automock]
pub trait Resolve {
	/// Resolves `name` into the IP addresses it points to. Blocks the calling
	/// thread until the lookup completes.
	fn lookup_host(&self, name: &str) -> io::Result<Vec<IpAddr>>;
}

/// Resolver backed by the operating system's `getaddrinfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
	fn lookup_host(&self, name: &str) -> io::Result<Vec<IpAddr>> {
		// Port is required by the lookup API and discarded afterwards
		let mut addrs = Vec::new();
		for addr in (name, 0).to_socket_addrs()? {
			if !addrs.contains(&addr.ip()) {
				addrs.push(addr.ip());
			}
		}
		debug!(name, addrs = addrs.len(), "Resolved host");
		Ok(addrs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_ip_literal_without_network() {
		let addrs = SystemResolver.lookup_host("10.1.2.3").unwrap();
		assert_eq!(addrs, vec!["10.1.2.3".parse::<IpAddr>().unwrap()]);
	}
}
