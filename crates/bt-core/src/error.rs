//! Shared error base type.
//!
//! Sub-crates define their own error enums and convert into `BtError` via
//! `From` impls, or keep them separate and wrap `BtError` as one variant.
//! Both patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

/// The shared base error type for `bt-core` and a common conversion target
/// for sub-crates.
#[derive(Debug, Error)]
pub enum BtError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type.
pub type BtResult<T> = Result<T, BtError>;
