use common::types::{
    chat::{ChatRequest, ChatResponse},
    language::Language,
};
use tracing::{debug, warn};

use crate::{
    error::TranscriptError,
    message::TranscriptMessage,
    state::{compute_next_state, TranscriptState, TranscriptTransition},
    transport::ChatTransport,
};

/// Text of the implicit request that opens a conversation.
pub const OPENING_MESSAGE: &str = "initialize chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    Answered,
    Failed,
}

/// An append-only conversation with at most one request in flight.
pub struct Transcript<T> {
    transport: T,
    language: Language,
    state: TranscriptState,
    messages: Vec<TranscriptMessage>,
}

impl<T: ChatTransport> Transcript<T> {
    /// Runs the opening turn. If it fails, the static greeting takes its place, so a
    /// transcript is never empty.
    pub async fn open(transport: T, language: Language) -> Self {
        let opening = ChatRequest::new(OPENING_MESSAGE, language, true);
        let first = match transport.send(&opening).await {
            Ok(response) if response.success => TranscriptMessage::reply(&response),
            Ok(_) => {
                warn!(%language, "opening turn unsuccessful; using default greeting");
                TranscriptMessage::greeting(language)
            }
            Err(err) => {
                warn!(%language, error = %err, "opening turn failed; using default greeting");
                TranscriptMessage::greeting(language)
            }
        };

        Self {
            transport,
            language,
            state: TranscriptState::Idle,
            messages: vec![first],
        }
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    pub fn state(&self) -> TranscriptState {
        self.state
    }

    /// Input is only accepted while idle.
    pub fn accepts_input(&self) -> bool {
        self.state == TranscriptState::Idle
    }

    /// Appends the user's entry and moves to `AwaitingResponse`.
    ///
    /// Returns `None` for blank input, which leaves the transcript untouched.
    pub fn submit(&mut self, text: &str) -> Result<Option<ChatRequest>, TranscriptError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if !self.accepts_input() {
            return Err(TranscriptError::Busy);
        }

        self.state = compute_next_state(self.state, TranscriptTransition::Send)?;
        self.messages.push(TranscriptMessage::user(text));

        Ok(Some(ChatRequest::new(text, self.language, false)))
    }

    /// Appends the outcome of the pending request and returns to `Idle`.
    pub fn receive(
        &mut self,
        result: Result<ChatResponse, TranscriptError>,
    ) -> Result<SendOutcome, TranscriptError> {
        self.state = compute_next_state(self.state, TranscriptTransition::Settle)?;

        match result.and_then(|response| {
            if response.success {
                Ok(response)
            } else {
                Err(TranscriptError::Unsuccessful)
            }
        }) {
            Ok(response) => {
                self.messages.push(TranscriptMessage::reply(&response));
                if !response.has_enough_context {
                    self.messages.push(TranscriptMessage::route(self.language));
                }
                debug!(entries = self.messages.len(), "assistant reply appended");
                Ok(SendOutcome::Answered)
            }
            Err(err) => {
                warn!(error = %err, "chat request failed");
                self.messages.push(TranscriptMessage::error(self.language));
                Ok(SendOutcome::Failed)
            }
        }
    }

    /// Abandons the pending request without recording a reply. The user's entry stays.
    pub fn cancel(&mut self) -> Result<(), TranscriptError> {
        self.state = compute_next_state(self.state, TranscriptTransition::Cancel)?;
        debug!(entries = self.messages.len(), "pending request cancelled");
        Ok(())
    }

    /// Submits `text`, waits for the transport, and records the reply.
    ///
    /// Dropping the future mid-request leaves the transcript in `AwaitingResponse`;
    /// call [`Transcript::cancel`] before submitting again.
    pub async fn send(&mut self, text: &str) -> Result<SendOutcome, TranscriptError> {
        let Some(request) = self.submit(text)? else {
            return Ok(SendOutcome::Ignored);
        };
        let result = self.transport.send(&request).await;
        self.receive(result)
    }
}
