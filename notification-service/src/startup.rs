//! Application startup and lifecycle management.
//!
//! This module provides the minimal HTTP server (health/metrics) and gRPC
//! server for the notification service, plus the load sampler that runs
//! alongside them. All business logic is exposed via gRPC.

use crate::config::NotificationConfig;
use crate::grpc::{
    proto::{notification_service_server::NotificationServiceServer, FILE_DESCRIPTOR_SET},
    NotificationGrpcService,
};
use crate::services::{get_metrics, LogDispatcher, NotificationDispatcher};
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use service_core::error::AppError;
use service_core::grpc::{
    create_health_service, create_reflection_service, metrics_interceptor,
    request_id_interceptor, GrpcServerBuilder,
};
use service_core::load::{AlertPolicy, LoadSampler, RequestCounter};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub request_counter: RequestCounter,
    pub dispatcher: Arc<dyn NotificationDispatcher>,
}

/// Health check endpoint for Docker/K8s liveness probes.
async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "notification-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check endpoint for K8s readiness probes.
///
/// The service holds no external connections, so once the listeners are up
/// it is ready.
async fn readiness_check() -> StatusCode {
    StatusCode::OK
}

async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    grpc_port: u16,
    http_listener: TcpListener,
    grpc_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: NotificationConfig) -> Result<Self, AppError> {
        let state = AppState {
            request_counter: RequestCounter::new(),
            dispatcher: Arc::new(LogDispatcher),
        };

        // Bind HTTP listener (port 0 = random port for testing)
        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", http_addr, e);
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        // Bind gRPC listener (port 0 = random port for testing)
        let grpc_listener = TcpListener::bind("0.0.0.0:0").await.map_err(|e| {
            tracing::error!("Failed to bind gRPC listener: {}", e);
            AppError::from(e)
        })?;
        let grpc_port = grpc_listener.local_addr()?.port();

        tracing::info!(
            "Notification service: HTTP on port {}, gRPC on port {}",
            http_port,
            grpc_port
        );

        Ok(Self {
            http_port,
            grpc_port,
            http_listener,
            grpc_listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Get the gRPC port the server is listening on.
    pub fn grpc_port(&self) -> u16 {
        self.grpc_port
    }

    /// Get a handle to the shared request counter.
    pub fn request_counter(&self) -> RequestCounter {
        self.state.request_counter.clone()
    }

    /// Run the application until stopped by a shutdown signal.
    ///
    /// This starts the HTTP health server, the gRPC server, and the load
    /// sampler, then winds all three down together.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        // The sampler and the request path share only the counter.
        let sampler =
            LoadSampler::new(self.state.request_counter.clone(), AlertPolicy::default()).spawn();

        let http_router = Router::new()
            .route("/health", get(health_check))
            .route("/ready", get(readiness_check))
            .route("/metrics", get(metrics_endpoint))
            .layer(tower_http::trace::TraceLayer::new_for_http());

        let notification_service = NotificationGrpcService::new(self.state);

        let health = create_health_service("pulse.notification.v1.NotificationService").await;

        // Reflection service for debugging
        let reflection_service = create_reflection_service(&[FILE_DESCRIPTOR_SET]).map_err(|e| {
            std::io::Error::other(format!("Failed to build reflection service: {}", e))
        })?;

        // Apply request-id and metering interceptors
        let layer = tower::ServiceBuilder::new()
            .layer(tonic::service::interceptor(request_id_interceptor))
            .layer(tonic::service::interceptor(metrics_interceptor))
            .into_inner();

        let incoming = tokio_stream::wrappers::TcpListenerStream::new(self.grpc_listener);
        let grpc_server = GrpcServerBuilder::new("notification-service")
            .build_server()
            .layer(layer)
            .add_service(health.server)
            .add_service(reflection_service)
            .add_service(NotificationServiceServer::new(notification_service))
            .serve_with_incoming(incoming);

        let result = tokio::select! {
            result = axum::serve(self.http_listener, http_router) => {
                result.map_err(|e| {
                    tracing::error!("HTTP server error: {}", e);
                    std::io::Error::other(format!("HTTP server error: {}", e))
                })
            }
            result = grpc_server => {
                result.map_err(|e| {
                    tracing::error!("gRPC server error: {}", e);
                    std::io::Error::other(format!("gRPC server error: {}", e))
                })
            }
            _ = shutdown_signal() => Ok(()),
        };

        health.reporter.set_not_serving().await;
        sampler.stop().await;

        result
    }
}
