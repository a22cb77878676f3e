use crate::Time;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Time cannot be represented as an ISO-8601 timestamp {0}")]
    InvalidTime(Time),
}
