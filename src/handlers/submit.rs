use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::error::AppError;
use crate::models::{OutboundNotification, SubmitRequest, SubmitResponse};
use crate::services::{record_provider_call, record_submission};
use crate::startup::AppState;

/// Accept a contact-form submission and forward it to the configured topic.
///
/// Decoding is handled here rather than by the extractor's default rejection
/// so malformed bodies get the caller-safe `invalid request format` message.
#[tracing::instrument(skip(state, payload))]
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Rejected submission with malformed body");
        record_submission("rejected");
        AppError::BadRequest(anyhow::anyhow!("invalid request format"))
    })?;

    if !request.is_valid() {
        record_submission("rejected");
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "email and message are required"
        )));
    }

    let notification =
        OutboundNotification::contact_message(&state.config.sns.topic_arn, &request);

    match state.publisher.publish(&notification).await {
        Ok(receipt) => {
            let notification_id = receipt.provider_id.unwrap_or_default();
            record_provider_call("sns", "success");
            record_submission("sent");

            tracing::info!(
                notification_id = %notification_id,
                email = %request.email,
                "Submission forwarded"
            );

            Ok((
                StatusCode::OK,
                Json(SubmitResponse {
                    message: "Mensagem enviada com sucesso via SNS!".to_string(),
                    notification_id,
                }),
            ))
        }
        Err(e) => {
            record_provider_call("sns", "failed");
            record_submission("failed");

            tracing::error!(
                error = %e,
                email = %request.email,
                "Failed to publish submission"
            );

            Err(AppError::PublishError(anyhow::anyhow!(e)))
        }
    }
}
