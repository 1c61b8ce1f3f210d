#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("room {0} is already assigned to another admitted patient")]
    RoomTaken(String),

    #[error("failed to fetch people: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("people source returned HTTP {0}")]
    FetchStatus(u16),
    #[error("failed to deserialize people: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to serialize patients: {0}")]
    Serialization(serde_json::Error),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
