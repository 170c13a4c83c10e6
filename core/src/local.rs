//! Discovery of the names that identify the local machine.
//!
//! The local identity is made of every non-loopback IPv4 address bound to a
//! local interface, plus the machine's hostname. The hostname is always added,
//! even when its addresses are already covered, so that self exclusion also
//! works against peer lists built from hostnames.
use crate::{error::Error, types::NameSet};
use mockall::automock;
use std::{io, net::IpAddr};
use tracing::{debug, trace};

/// Local network interface as seen by [`LocalNetwork`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
	pub index: u32,
	pub name: String,
	/// Addresses captured while enumerating, served by [`SystemNetwork::addresses`].
	pub addrs: Vec<IpAddr>,
}

impl Interface {
	pub fn new(index: u32, name: &str) -> Self {
		Interface {
			index,
			name: name.to_string(),
			addrs: vec![],
		}
	}
}

#[automock]
pub trait LocalNetwork {
	fn interfaces(&self) -> io::Result<Vec<Interface>>;
	fn addresses(&self, interface: &Interface) -> io::Result<Vec<IpAddr>>;
	fn hostname(&self) -> io::Result<String>;
}

/// [`LocalNetwork`] reading the state of the machine the process runs on.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNetwork;

impl LocalNetwork for SystemNetwork {
	fn interfaces(&self) -> io::Result<Vec<Interface>> {
		let interfaces = netdev::get_interfaces()
			.into_iter()
			.map(|iface| Interface {
				index: iface.index,
				addrs: iface
					.ipv4
					.iter()
					.map(|net| IpAddr::V4(net.addr()))
					.chain(iface.ipv6.iter().map(|net| IpAddr::V6(net.addr())))
					.collect(),
				name: iface.name,
			})
			.collect();
		Ok(interfaces)
	}

	fn addresses(&self, interface: &Interface) -> io::Result<Vec<IpAddr>> {
		Ok(interface.addrs.clone())
	}

	fn hostname(&self) -> io::Result<String> {
		hostname::get()?.into_string().map_err(|name| {
			io::Error::new(
				io::ErrorKind::InvalidData,
				format!("hostname {name:?} is not valid UTF-8"),
			)
		})
	}
}

/// Returns `true` for addresses usable to recognize this machine among peers.
pub fn is_identifying(addr: &IpAddr) -> bool {
	matches!(addr, IpAddr::V4(ip) if !ip.is_loopback())
}

/// Collects the local identity: non-loopback IPv4 addresses and the hostname.
pub fn local_names(network: &impl LocalNetwork) -> Result<NameSet, Error> {
	let mut names = NameSet::new();

	for interface in network.interfaces().map_err(Error::InterfaceEnumeration)? {
		let addrs = network
			.addresses(&interface)
			.map_err(|source| Error::AddressEnumeration {
				interface: interface.name.clone(),
				source,
			})?;

		for addr in addrs {
			if !is_identifying(&addr) {
				trace!(interface = %interface.name, %addr, "Skipping local address");
				continue;
			}
			names.insert(addr.to_string());
		}
	}

	let hostname = network.hostname().map_err(Error::Hostname)?;
	debug!(%hostname, addrs = names.len(), "Discovered local names");
	names.insert(hostname);

	Ok(names)
}

#[cfg(test)]
mod tests {
	use super::*;
	use test_case::test_case;

	fn ip(addr: &str) -> IpAddr {
		addr.parse().unwrap()
	}

	#[test_case("10.0.0.1" => true ; "Private IPv4")]
	#[test_case("159.73.143.3" => true ; "Global IPv4")]
	#[test_case("127.0.0.1" => false ; "Loopback IPv4")]
	#[test_case("127.10.0.1" => false ; "Loopback range IPv4")]
	#[test_case("::1" => false ; "Loopback IPv6")]
	#[test_case("fe80::1" => false ; "Link local IPv6")]
	#[test_case("2001:db8::1" => false ; "Global IPv6")]
	fn test_is_identifying(addr: &str) -> bool {
		is_identifying(&ip(addr))
	}

	fn mock_network(addrs: Vec<(&'static str, Vec<&'static str>)>, hostname: &str) -> MockLocalNetwork {
		let mut network = MockLocalNetwork::new();
		let interfaces: Vec<Interface> = addrs
			.iter()
			.enumerate()
			.map(|(index, (name, _))| Interface::new(index as u32, name))
			.collect();
		network
			.expect_interfaces()
			.return_once(move || Ok(interfaces));
		network.expect_addresses().returning(move |interface| {
			Ok(addrs[interface.index as usize]
				.1
				.iter()
				.map(|addr| ip(addr))
				.collect())
		});
		let hostname = hostname.to_string();
		network
			.expect_hostname()
			.returning(move || Ok(hostname.clone()));
		network
	}

	#[test]
	fn keeps_non_loopback_ipv4_and_hostname() {
		let network = mock_network(
			vec![
				("lo", vec!["127.0.0.1", "::1"]),
				("eth0", vec!["10.0.0.7", "fe80::42"]),
				("eth1", vec!["192.168.1.20"]),
			],
			"node-1",
		);

		let names = local_names(&network).unwrap();
		let expected: NameSet = ["10.0.0.7", "192.168.1.20", "node-1"]
			.into_iter()
			.map(String::from)
			.collect();
		assert_eq!(names, expected);
	}

	#[test]
	fn hostname_only_without_interfaces() {
		let network = mock_network(vec![], "node-1");
		let names = local_names(&network).unwrap();
		assert_eq!(names, NameSet::from(["node-1".to_string()]));
	}

	#[test]
	fn interface_enumeration_failure() {
		let mut network = MockLocalNetwork::new();
		network
			.expect_interfaces()
			.returning(|| Err(io::Error::other("netlink unavailable")));
		network.expect_hostname().never();

		let error = local_names(&network).unwrap_err();
		assert!(matches!(error, Error::InterfaceEnumeration(_)));
		assert_eq!(error.to_string(), "interfaces: netlink unavailable");
	}

	#[test]
	fn address_enumeration_failure_names_interface() {
		let mut network = MockLocalNetwork::new();
		network
			.expect_interfaces()
			.returning(|| Ok(vec![Interface::new(2, "eth0")]));
		network
			.expect_addresses()
			.returning(|_| Err(io::Error::other("permission denied")));
		network.expect_hostname().never();

		let error = local_names(&network).unwrap_err();
		assert!(
			matches!(&error, Error::AddressEnumeration { interface, .. } if interface == "eth0")
		);
	}

	#[test]
	fn hostname_failure() {
		let mut network = MockLocalNetwork::new();
		network.expect_interfaces().returning(|| Ok(vec![]));
		network
			.expect_hostname()
			.returning(|| Err(io::Error::other("uname failed")));

		let error = local_names(&network).unwrap_err();
		assert!(matches!(error, Error::Hostname(_)));
	}

	#[test]
	fn system_network_reports_hostname() {
		let hostname = SystemNetwork.hostname().unwrap();
		let names = local_names(&SystemNetwork).unwrap();
		assert!(names.contains(&hostname));
		assert!(names
			.iter()
			.filter(|name| **name != hostname)
			.all(|name| name.parse::<IpAddr>().is_ok_and(|addr| is_identifying(&addr))));
	}
}
