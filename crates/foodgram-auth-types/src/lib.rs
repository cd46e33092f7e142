//! Auth types shared across Foodgram crates.
//!
//! Provides JWT issue/validation and the `Identity` / `OptionalIdentity` extractors.

pub mod identity;
pub mod token;
