use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    #[error("line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("line {line}: bad timestamp {value:?}")]
    Timestamp { line: usize, value: String },

    #[error("line {line}: timestamp goes backwards")]
    OutOfOrder { line: usize },

    #[error("line {line}: hand {hand} has {count} landmarks, expected 21")]
    LandmarkCount {
        line: usize,
        hand: usize,
        count: usize,
    },

    #[error("line {line}: bad hand or landmark index {value:?}")]
    Index { line: usize, value: String },

    #[error("line {line}: bad landmark {value:?}")]
    Landmark { line: usize, value: String },
}
