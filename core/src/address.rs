use crate::{
	error::Error,
	types::{NameSet, PORT_SEPARATOR},
};

/// Returns a new set in which every name carries a port.
///
/// Bare names (`host`, `10.0.0.1`) get `:port` appended. Names that already
/// are in `host:port` form are kept as they are, even if their port differs.
/// Any other shape, including bare IPv6 addresses, is rejected.
pub fn attach_port_if_missing(names: &NameSet, port: u16) -> Result<NameSet, Error> {
	names
		.iter()
		.map(|name| with_port(name, port))
		.collect()
}

fn with_port(name: &str, port: u16) -> Result<String, Error> {
	match name.split(PORT_SEPARATOR).count() {
		1 => Ok(format!("{name}{PORT_SEPARATOR}{port}")),
		2 => Ok(name.to_string()),
		_ => Err(Error::InvalidFormat {
			name: name.to_string(),
		}),
	}
}
