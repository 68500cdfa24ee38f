use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConciergeError {
    #[error("Missing configuration: {0}")]
    Config(String),

    #[error("Business search failed: {0}")]
    BusinessSearch(String),

    #[error("Search index error: {0}")]
    SearchIndex(String),

    #[error("Record store error: {0}")]
    RecordStore(String),

    #[error("Queue error: {0}")]
    Queue(String),

    #[error("Email error: {0}")]
    Email(String),

    #[error("Bot runtime error: {0}")]
    Bot(String),

    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Intent - {0} not implemented yet")]
    UnknownIntent(String),

    #[error("Slot {0} has no value")]
    MissingSlot(String),
}

pub type Result<T> = std::result::Result<T, ConciergeError>;

impl ConciergeError {
    pub fn search_index(e: impl Display) -> Self {
        Self::SearchIndex(e.to_string())
    }

    pub fn record_store(e: impl Display) -> Self {
        Self::RecordStore(e.to_string())
    }

    pub fn queue(e: impl Display) -> Self {
        Self::Queue(e.to_string())
    }

    pub fn email(e: impl Display) -> Self {
        Self::Email(e.to_string())
    }

    pub fn bot(e: impl Display) -> Self {
        Self::Bot(e.to_string())
    }
}

impl From<reqwest::Error> for ConciergeError {
    fn from(e: reqwest::Error) -> Self {
        Self::BusinessSearch(e.to_string())
    }
}

impl From<elasticsearch::Error> for ConciergeError {
    fn from(e: elasticsearch::Error) -> Self {
        Self::SearchIndex(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_intent_message_names_the_intent() {
        let err = ConciergeError::UnknownIntent("OrderPizzaIntent".to_owned());
        assert_eq!(err.to_string(), "Intent - OrderPizzaIntent not implemented yet");
    }

    #[test]
    fn payload_errors_convert_from_serde() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: ConciergeError = parse.unwrap_err().into();
        assert!(matches!(err, ConciergeError::Payload(_)));
    }
}
