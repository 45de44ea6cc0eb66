//! Resolution engine module.
//!
//! This module provides the cascade over geocoding providers, including:
//! - Priority ordering (the order providers were registered in)
//! - Bounded retries for timeouts
//! - Fail-fast on connection errors, bad responses and empty results
//! - Per-attempt diagnostics for log output

mod attempt;
mod cascade;
mod decision;
mod resolver;
mod retry_policy;

pub use cascade::GeocodingEngine;
pub use resolver::AddressResolver;
pub use retry_policy::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
