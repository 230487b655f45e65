//! Domain value objects and types.
//!
//! Type-safe wrappers for registrable domains and email addresses. Both are
//! validated (or normalized) at construction time so the rest of the pipeline
//! never sees a malformed value.

pub mod email;
pub mod errors;
pub mod normalized;
mod public_suffix;

pub use email::{is_valid_email, EmailAddress};
pub use errors::EmailSyntaxError;
pub use normalized::{normalize, NormalizedDomain};
