//! Error types returned by the host list pipeline.
use std::io;
use strum::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("resolve dns {record}: {source}")]
	Resolution {
		record: String,
		#[source]
		source: io::Error,
	},
	#[error("dns record {record} is empty")]
	EmptyResult { record: String },
	#[error("interfaces: {0}")]
	InterfaceEnumeration(#[source] io::Error),
	#[error("addrs of {interface}: {source}")]
	AddressEnumeration {
		interface: String,
		#[source]
		source: io::Error,
	},
	#[error("hostname: {0}")]
	Hostname(#[source] io::Error),
	#[error("invalid name format: {name}, expected 'host' or 'ip:port'")]
	InvalidFormat { name: String },
}

/// Pipeline stage in which a [`BuildError`] occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
	#[strum(serialize = "resolve")]
	Resolve,
	#[strum(serialize = "attach port to resolved names")]
	AttachPortToResolved,
	#[strum(serialize = "get local names")]
	LocalNames,
	#[strum(serialize = "attach port to local names")]
	AttachPortToLocal,
}

/// Failure of a whole `build` call, tagged with the stage that failed.
#[derive(Error, Debug)]
#[error("{stage}: {source}")]
pub struct BuildError {
	pub stage: Stage,
	#[source]
	pub source: Error,
}

impl BuildError {
	pub fn new(stage: Stage, source: Error) -> Self {
		BuildError { stage, source }
	}

	pub fn kind(&self) -> &Error {
		&self.source
	}
}

pub(crate) trait StageContext<T> {
	fn stage(self, stage: Stage) -> Result<T, BuildError>;
}

impl<T> StageContext<T> for Result<T, Error> {
	fn stage(self, stage: Stage) -> Result<T, BuildError> {
		self.map_err(|source| BuildError::new(stage, source))
	}
}
