use serde::{Deserialize, Serialize};

/// Subject line attached to every forwarded submission.
pub const NOTIFICATION_SUBJECT: &str = "Nova mensagem recebida";

/// Incoming contact-form payload.
///
/// Fields default to the empty string so an absent field and an empty field
/// fail validation the same way.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl SubmitRequest {
    /// Presence check only; email format is deliberately not validated.
    pub fn is_valid(&self) -> bool {
        !self.email.is_empty() && !self.message.is_empty()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub message: String,
    pub notification_id: String,
}

/// Notification handed to the publish provider. Request-scoped.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundNotification {
    pub topic_arn: String,
    pub subject: String,
    pub body: String,
}

impl OutboundNotification {
    /// Build the notification for a contact submission. The topic always comes
    /// from configuration, never from the request.
    pub fn contact_message(topic_arn: &str, request: &SubmitRequest) -> Self {
        Self {
            topic_arn: topic_arn.to_string(),
            subject: NOTIFICATION_SUBJECT.to_string(),
            body: format!("Mensagem de: {}\n\n{}", request.email, request.message),
        }
    }
}
