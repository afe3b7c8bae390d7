use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("a reply is still pending")]
    Busy,
    #[error("invalid transcript transition: {0}")]
    InvalidTransition(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("assistant replied with HTTP {0}")]
    Status(u16),
    #[error("assistant reported a failed turn")]
    Unsuccessful,
}

impl From<reqwest::Error> for TranscriptError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
