use crate::{Error, Result};
use tracing::{debug, info, warn};

// Per-trigger states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    Validating,
    Dispatching,
    Succeeded,
    ApiFailed,
    TransportFailed,
    Malformed,
}

// Per-trigger events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationEvent {
    Triggered,
    TopicRejected,
    Busy,
    Dispatched,
    Generated,
    ApiRejected,
    TransportLost,
    ResponseMalformed,
    Settled,
}

/// Tracks one trigger from `Idle` back to `Idle`.
#[derive(Debug)]
pub struct GenerationStateMachine {
    state: GenerationState,
}

impl Default for GenerationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationStateMachine {
    pub fn new() -> Self {
        Self {
            state: GenerationState::Idle,
        }
    }

    pub fn current_state(&self) -> GenerationState {
        self.state
    }

    pub fn transition(&mut self, event: GenerationEvent) -> Result<()> {
        use GenerationEvent as E;
        use GenerationState as S;

        let old_state = self.state;
        debug!("FSM processing event {:?} in state {:?}", event, old_state);

        let new_state = match (old_state, event) {
            (S::Idle, E::Triggered) => S::Validating,
            (S::Validating, E::TopicRejected) => S::Idle,
            (S::Validating, E::Busy) => S::Idle,
            (S::Validating, E::Dispatched) => S::Dispatching,
            (S::Dispatching, E::Generated) => S::Succeeded,
            (S::Dispatching, E::ApiRejected) => S::ApiFailed,
            (S::Dispatching, E::TransportLost) => S::TransportFailed,
            (S::Dispatching, E::ResponseMalformed) => S::Malformed,
            (S::Succeeded | S::ApiFailed | S::TransportFailed | S::Malformed, E::Settled) => {
                S::Idle
            }
            _ => {
                warn!(
                    "Invalid FSM transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::fsm(format!(
                    "Invalid transition from {:?} with event {:?}",
                    old_state, event
                )));
            }
        };

        info!(
            "FSM state transition: {:?} -> {:?} (event: {:?})",
            old_state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }

    /// True once a response (of any kind) has been handled but not settled.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self.state,
            GenerationState::Succeeded
                | GenerationState::ApiFailed
                | GenerationState::TransportFailed
                | GenerationState::Malformed
        )
    }

    pub fn is_idle(&self) -> bool {
        self.state == GenerationState::Idle
    }
}
