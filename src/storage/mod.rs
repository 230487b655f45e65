//! File persistence at the batch boundary: seen-URL ledger and row export.

pub mod export;
pub mod ledger;

pub use export::{write_rows, write_rows_to};
pub use ledger::SeenUrls;
