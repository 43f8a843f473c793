//! Crate for the `log-forwarder` project
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_copy_implementations)]
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod events;
pub mod handler;
pub mod lifecycle;
pub mod logger;
pub mod logs;
pub mod s3_client;

/// Value of the `forwarder_version` tag attached to every forwarded record.
pub const FORWARDER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix used by the log formatter, so our own logs are easy to tell apart
/// from the ones we forward.
pub const LOG_PREFIX: &str = "LOG_FORWARDER";
