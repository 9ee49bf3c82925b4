//! Client for the Quake III engine out-of-band query protocol, plus a small
//! exporter that turns `getstatus` and RPMod `rpmetrics` replies into named
//! numeric observations.
pub mod cli;
pub mod config;
pub mod connector;
pub mod core;
pub mod error;
pub mod infostring;
pub mod logging;
pub mod poller;
pub mod protocol;
pub mod response;
pub mod runtime;
pub mod transport;
pub mod ui;
pub mod util;

pub use cli::Cli;
pub use connector::Connector;
pub use crate::core::run;
pub use error::{ErrorKind, QueryError};
pub use poller::{Instruments, Observation, Poller, Scrape};
pub use response::{PlayerRecord, ServerInfo, ServerStatus};
pub use runtime::Runtime;
pub use util::name;
