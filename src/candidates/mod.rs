//! Email candidate generation from names and a domain.

pub mod conventions;
pub mod generator;

pub use conventions::{NamingConvention, CONVENTIONS};
pub use generator::{generate, generate_addresses, normalize_name_token, EmailCandidate};
