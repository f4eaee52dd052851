use crate::grpc::proto::{
    notification_service_server::NotificationService, GetStatusRequest, GetStatusResponse,
    SendNotificationRequest, SendNotificationResponse,
};
use crate::startup::AppState;
use tonic::{Request, Response, Status};

pub struct NotificationGrpcService {
    state: AppState,
}

impl NotificationGrpcService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[tonic::async_trait]
impl NotificationService for NotificationGrpcService {
    #[tracing::instrument(skip(self, request))]
    async fn send_notification(
        &self,
        request: Request<SendNotificationRequest>,
    ) -> Result<Response<SendNotificationResponse>, Status> {
        let req = request.into_inner();

        // The counter reflects requests received, not deliveries that
        // succeeded; count before touching the dispatcher.
        self.state.request_counter.increment();
        metrics::counter!("notifications_sent_total").increment(1);

        // Recipient and message are opaque strings; empty values pass through.
        if let Err(e) = self
            .state
            .dispatcher
            .dispatch(&req.user_id, &req.message)
            .await
        {
            tracing::warn!(user_id = %req.user_id, error = %e, "Notification dispatch failed");
        }

        Ok(Response::new(SendNotificationResponse { success: true }))
    }

    #[tracing::instrument(skip(self, _request))]
    async fn get_status(
        &self,
        _request: Request<GetStatusRequest>,
    ) -> Result<Response<GetStatusResponse>, Status> {
        Ok(Response::new(GetStatusResponse {
            status: "notification-service is running".to_string(),
        }))
    }
}
