//! Application layer - Use cases and orchestration.
//!
//! Services sequence the fallback chains and ports for a single request. They
//! receive every collaborator through their constructor and hold no global
//! state of their own.

pub mod services;

pub use services::{IngestRequest, IngestService, SearchService};
