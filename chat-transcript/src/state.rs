use state_machines::state_machine;

use crate::error::TranscriptError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptState {
    #[default]
    Idle,
    AwaitingResponse,
}

impl TranscriptState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptState::Idle => "idle",
            TranscriptState::AwaitingResponse => "awaiting-response",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum TranscriptTransition {
    Send,
    Settle,
    Cancel,
}

impl TranscriptTransition {
    fn as_str(&self) -> &'static str {
        match self {
            TranscriptTransition::Send => "send",
            TranscriptTransition::Settle => "settle",
            TranscriptTransition::Cancel => "cancel",
        }
    }
}

mod lifecycle {
    use super::state_machine;

    state_machine! {
        name: TranscriptMachine,
        initial: Idle,
        states: [Idle, AwaitingResponse],
        events {
            send {
                transition: { from: Idle, to: AwaitingResponse }
            }
            settle {
                transition: { from: AwaitingResponse, to: Idle }
            }
            cancel {
                transition: { from: AwaitingResponse, to: Idle }
            }
        }
    }

    pub(super) fn idle() -> TranscriptMachine<(), Idle> {
        TranscriptMachine::new(())
    }
}

fn invalid_transition(state: TranscriptState, event: TranscriptTransition) -> TranscriptError {
    TranscriptError::InvalidTransition(format!("{} -> {}", state.as_str(), event.as_str()))
}

pub(crate) fn compute_next_state(
    state: TranscriptState,
    event: TranscriptTransition,
) -> Result<TranscriptState, TranscriptError> {
    use lifecycle::idle;
    match (state, event) {
        (TranscriptState::Idle, TranscriptTransition::Send) => idle()
            .send()
            .map(|_| TranscriptState::AwaitingResponse)
            .map_err(|_| invalid_transition(state, event)),
        (TranscriptState::AwaitingResponse, TranscriptTransition::Settle) => idle()
            .send()
            .map_err(|_| invalid_transition(state, event))?
            .settle()
            .map(|_| TranscriptState::Idle)
            .map_err(|_| invalid_transition(state, event)),
        (TranscriptState::AwaitingResponse, TranscriptTransition::Cancel) => idle()
            .send()
            .map_err(|_| invalid_transition(state, event))?
            .cancel()
            .map(|_| TranscriptState::Idle)
            .map_err(|_| invalid_transition(state, event)),
        _ => Err(invalid_transition(state, event)),
    }
}
