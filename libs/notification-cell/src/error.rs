use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification client is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notification API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unknown contact method: {0}")]
    UnknownContactMethod(String),
}
