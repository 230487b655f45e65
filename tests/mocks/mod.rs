//! Shared test doubles.

pub mod mock_dns_lookup;
pub mod mock_search_provider;

#[allow(unused_imports)]
pub use mock_dns_lookup::MockDnsLookup;
#[allow(unused_imports)]
pub use mock_search_provider::MockSearchProvider;
