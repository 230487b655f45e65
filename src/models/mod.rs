//! Pipeline records.
//!
//! One explicit type per stage: raw search results, parsed people,
//! validation results and the enriched output row.

pub mod person;
pub mod row;
pub mod search_result;
pub mod validation;

pub use person::{strip_linkedin_suffix, ParsedPerson, PersonName};
pub use row::{EnrichedRow, ROW_HEADER};
pub use search_result::RawResult;
pub use validation::{ValidationReason, ValidationResult, ValidationStatus};
