//! Resolution of a host list, given as a DNS record or a static list of
//! names, into the set of peer endpoints excluding the local machine.
//!
//! ```no_run
//! use hostlist_core::HostListConfig;
//!
//! let config = HostListConfig::from_static(["node-1", "node-2:7001", "10.0.0.5"]);
//! let peers = config.build(7000)?;
//! # Ok::<(), hostlist_core::BuildError>(())
//! ```
pub mod address;
pub mod config;
pub mod error;
pub mod local;
pub mod resolve;
pub mod types;
pub mod utils;

pub use config::HostListConfig;
pub use error::{BuildError, Error, Stage};
pub use types::NameSet;
