//! Utility functions.
//!
//! - [`url_validator`] - Syntactic URL check used by the validation gate and the CLI
pub mod url_validator;
