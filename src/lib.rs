//! Linkprobe Core Library
//!
//! Validates file-hosting share links and asks each provider whether the
//! linked resource still exists.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`transport`] - HTTP request/response abstraction and the reqwest client
//! - [`checker`] - Provider link grammars, liveness probes and the registry
//! - [`batch`] - Sequential classification of many links
//!
//! The library reads no configuration files or environment variables; the
//! `linkprobe` binary owns those concerns.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod checker;
pub mod transport;

pub(crate) mod user_agent;

#[cfg(test)]
pub mod test_support;

// Re-export commonly used types
pub use batch::{BatchReport, BatchSummary, LinkOutcome, LinkReport, check_all};
pub use checker::{
    CheckError, CheckerEndpoints, CheckerRegistry, LinkChecker, LinkStatus, ProbeOptions,
    build_checker_registry, build_default_checker_registry,
};
pub use transport::{HttpTransport, Transport, TransportConfig, TransportError};
