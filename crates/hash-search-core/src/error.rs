use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Length {length} overflows the 64-bit search space (8^{length} > u64::MAX)")]
    SpaceOverflow { length: u8 },

    #[error("Invalid length: {0}")]
    InvalidLength(String),

    #[error("Invalid repetition count: {0}")]
    InvalidRepetitions(String),

    #[error("Empty {what} range: {min}..={max}")]
    EmptyRange { what: &'static str, min: u8, max: u8 },

    #[error("Sequence of {length} symbols exceeds buffer capacity of {capacity}")]
    SequenceTooLong { length: usize, capacity: usize },

    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(char),

    #[error("Window size must be at least 1")]
    InvalidWindowSize,

    #[error("Compute backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Dispatch failed at window offset {offset:#x}: {message}")]
    DispatchFailed { offset: u64, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error stems from caller input rather than the backend
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Error::SpaceOverflow { .. }
                | Error::InvalidLength(_)
                | Error::InvalidRepetitions(_)
                | Error::EmptyRange { .. }
                | Error::SequenceTooLong { .. }
                | Error::InvalidSymbol(_)
                | Error::InvalidWindowSize
        )
    }

    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
