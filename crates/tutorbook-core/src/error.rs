use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("tutor {tutor} already has a booking at {slot}")]
    SlotTaken { tutor: String, slot: String },

    #[error("no booking found for {tutor} at {slot}")]
    BookingNotFound { tutor: String, slot: String },

    #[error("unknown lesson type: {0}")]
    UnknownLessonType(String),

    #[error("unknown add-on: {0}")]
    UnknownAddOn(String),

    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),

    #[error("unknown pricing strategy: {0}")]
    UnknownStrategy(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{} subscriber(s) failed during {kind} broadcast: {}", .failures.len(), .failures.join("; "))]
    Broadcast {
        kind: String,
        delivered: usize,
        failures: Vec<String>,
    },

    #[error("payment declined: {0}")]
    PaymentDeclined(String),

    #[error("transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("subscriber error: {0}")]
    Subscriber(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;
