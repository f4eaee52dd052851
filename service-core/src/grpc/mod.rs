//! gRPC utilities shared by pulse services.
//!
//! This module provides:
//! - Interceptors for request identification and request metrics
//! - Health check service implementation
//! - Server builder utilities

pub mod health;
pub mod interceptors;
pub mod server;

pub use health::{create_health_service, HealthComponents, HealthReporter, HealthStatus};
pub use interceptors::{extract_request_id, metrics_interceptor, request_id_interceptor};
pub use server::{create_reflection_service, GrpcServerBuilder};

// Re-export commonly used tonic types
pub use tonic::{Code, Request, Response, Status};
