//! hospital-core: Shared infrastructure for the hospital billing workspace.
pub mod config;
pub mod error;
pub mod observability;

pub use serde;
pub use serde_json;
pub use tracing;
