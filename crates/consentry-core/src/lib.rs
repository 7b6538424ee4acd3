//! Consentry Core: consent record model and shared error types.

pub mod consent;
pub mod error;

pub use consent::{classify, ConsentDecision, ConsentState, CONSENT_KEY};
pub use error::{Error, Result};
