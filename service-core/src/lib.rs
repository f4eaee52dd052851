//! service-core: Shared infrastructure for pulse services.
pub mod config;
pub mod error;
pub mod grpc;
pub mod load;
pub mod observability;

pub use serde;
pub use tokio;
pub use tonic;
pub use tracing;
