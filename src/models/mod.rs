pub mod submission;

pub use submission::{OutboundNotification, SubmitRequest, SubmitResponse, NOTIFICATION_SUBJECT};
