pub mod error;
pub mod message;
pub mod state;
pub mod transcript;
pub mod transport;

pub use error::TranscriptError;
pub use message::{Origin, TranscriptMessage};
pub use state::TranscriptState;
pub use transcript::{SendOutcome, Transcript, OPENING_MESSAGE};
pub use transport::{ChatTransport, HttpTransport};
