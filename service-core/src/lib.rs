//! service-core: Shared HTTP infrastructure for the quiz workspace.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
