mod executor;
pub mod fsm;
pub mod request;

pub use executor::{EventResult, GenerationOutcome, Generator, PageEvent};
pub use fsm::{GenerationEvent, GenerationState, GenerationStateMachine};
pub use request::{ValidationError, build_request};
