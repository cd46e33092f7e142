//! Test utilities for Foodgram services.
//!
//! Only for use from dev-dependencies.

pub mod auth;
