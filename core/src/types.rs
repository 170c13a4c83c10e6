//! Shared host list types and serde helpers.
use std::{collections::HashSet, time::Duration};

/// Unordered set of host names, IP addresses or `host:port` endpoints.
///
/// The same representation is used for raw names and for port normalized
/// endpoints, so sets must be normalized with the same port before they are
/// compared or subtracted.
pub type NameSet = HashSet<String>;

/// Separator between host and port in an endpoint string.
pub const PORT_SEPARATOR: char = ':';

pub mod tracing_level_format {
	use serde::{self, Deserialize, Deserializer, Serializer};
	use std::str::FromStr;
	use tracing::Level;

	pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&level.to_string())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		Level::from_str(&value).map_err(serde::de::Error::custom)
	}
}

pub mod duration_seconds_format {
	use super::Duration;
	use serde::{self, Deserialize, Deserializer, Serializer};

	pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u64(duration.as_secs())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
	where
		D: Deserializer<'de>,
	{
		u64::deserialize(deserializer).map(Duration::from_secs)
	}
}

pub mod duration_millis_format {
	use super::Duration;
	use serde::{self, Deserialize, Deserializer, Serializer};

	pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u64(duration.as_millis() as u64)
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
	where
		D: Deserializer<'de>,
	{
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}
