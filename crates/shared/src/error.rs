use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("{field} must not be blank")]
    Validation { field: &'static str },
    #[error("unknown status '{0}'; expected one of saved, applied, interview, offer")]
    UnknownStatus(String),
    #[error("no opportunity ids left to assign")]
    IdsExhausted,
    #[error("persisted snapshot is corrupt: {0}")]
    CorruptState(String),
    #[error("failed to persist snapshot: {0}")]
    Persistence(String),
}
