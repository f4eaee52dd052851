use notification_service::config::NotificationConfig;
use notification_service::grpc::proto::notification_service_client::NotificationServiceClient;
use notification_service::startup::Application;
use service_core::config::Config as CoreConfig;
use tonic::transport::Channel;

pub struct TestApp {
    pub http_address: String,
    pub grpc_address: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        notification_service::services::init_metrics();

        // Use random ports for testing (port 0)
        let config = NotificationConfig {
            common: CoreConfig {
                port: 0,
                log_level: "info".to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let http_port = app.http_port();
        let grpc_port = app.grpc_port();
        let http_address = format!("http://127.0.0.1:{}", http_port);
        let grpc_address = format!("http://127.0.0.1:{}", grpc_port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("http://127.0.0.1:{}/health", http_port);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        // Additional wait for gRPC server
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestApp {
            http_address,
            grpc_address,
        }
    }

    /// Create a gRPC client connected to this test app.
    pub async fn grpc_client(&self) -> NotificationServiceClient<Channel> {
        NotificationServiceClient::connect(self.grpc_address.clone())
            .await
            .expect("Failed to connect to gRPC server")
    }
}
