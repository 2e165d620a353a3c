use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to connect to message broker: {0}")]
    Connection(String),

    #[error("failed to publish to '{subject}': {message}")]
    Publish { subject: String, message: String },
}

impl PublishError {
    pub fn publish(subject: impl Into<String>, message: impl ToString) -> Self {
        Self::Publish {
            subject: subject.into(),
            message: message.to_string(),
        }
    }
}

pub type PublishResult<T> = Result<T, PublishError>;
