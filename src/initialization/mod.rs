//! Initialization of shared resources.
//!
//! Constructors for the logger, HTTP clients, and the PTR resolver, all
//! called once at the start of a watch cycle.

mod client;
mod logger;
mod resolver;

pub use client::{init_doh_client, init_intel_client};
pub use logger::init_logger_with;
pub use resolver::init_resolver;
