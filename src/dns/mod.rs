//! DNS lookups and the email validator built on them.

pub mod resolver;
pub mod validator;

pub use resolver::{DnsLookup, HickoryLookup, MxRecord};
pub use validator::{DnsValidator, DomainVerdict};
