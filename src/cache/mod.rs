//! Caching utilities.
//!
//! A generic time-based cache shared by the DNS validator and domain discovery.

pub mod timed_cache;

pub use timed_cache::TimedCache;
