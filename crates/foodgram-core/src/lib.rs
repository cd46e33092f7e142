//! Cross-cutting HTTP plumbing shared by Foodgram services.

pub mod health;
pub mod middleware;
pub mod tracing;
