use super::{
    fsm::{GenerationEvent, GenerationStateMachine},
    request::{ValidationError, build_request},
};
use crate::{
    Error, Result,
    api::{ApiReply, GenerationApi, ToolKind},
    page::{DisplayContent, Page, Slider, messages},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const TRIGGER_KEY: &str = "Enter";

/// Input the page reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Trigger control activated.
    Click,
    /// Key pressed while the topic field has focus.
    KeyPress(String),
    TopicInput(String),
    SliderInput { slider: Slider, value: String },
}

/// How one trigger ended.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// A request was already in flight; nothing happened.
    Ignored,
    Invalid(ValidationError),
    Generated(String),
    ApiError { status: u16, message: String },
    TransportError,
    UnexpectedResponse,
}

impl GenerationOutcome {
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Generated(_) | Self::Ignored)
    }
}

/// One tool page wired to the generation API.
pub struct Generator {
    page: Arc<Page>,
    api: Arc<dyn GenerationApi>,
}

impl Generator {
    pub fn new(page: Arc<Page>, api: Arc<dyn GenerationApi>) -> Self {
        info!("Wiring {} page to generation API", page.tool());
        Self { page, api }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn tool(&self) -> ToolKind {
        self.page.tool()
    }

    /// Routes a page event. Returns the outcome when the event triggered
    /// generation, or the refreshed slider label for slider input.
    pub async fn handle_event(&self, event: PageEvent) -> Result<EventResult> {
        match event {
            PageEvent::Click => Ok(EventResult::Generation(self.generate().await?)),
            PageEvent::KeyPress(key) if key == TRIGGER_KEY => {
                Ok(EventResult::Generation(self.generate().await?))
            }
            PageEvent::KeyPress(key) => {
                debug!("Ignoring key {:?} in topic field", key);
                Ok(EventResult::Unhandled)
            }
            PageEvent::TopicInput(text) => {
                self.page.topic().set_text(text);
                Ok(EventResult::Unhandled)
            }
            PageEvent::SliderInput { slider, value } => {
                let label = self.page.set_slider(slider, &value)?;
                Ok(EventResult::SliderLabel(label))
            }
        }
    }

    /// collect -> validate -> dispatch -> render -> re-enable.
    pub async fn generate(&self) -> Result<GenerationOutcome> {
        let tool = self.tool();
        let trigger = self.page.trigger();
        let display = self.page.display();

        if !trigger.is_enabled() {
            debug!("Ignoring {} trigger while a request is in flight", tool);
            return Ok(GenerationOutcome::Ignored);
        }

        let mut fsm = GenerationStateMachine::new();
        fsm.transition(GenerationEvent::Triggered)?;

        let snapshot = self.page.snapshot();
        let request = match build_request(tool, &snapshot) {
            Ok(request) => request,
            Err(reason) => {
                warn!("Rejected {} trigger: {}", tool, reason);
                let text = match reason {
                    ValidationError::EmptyTopic => messages::EMPTY_TOPIC,
                    ValidationError::MissingStoryParams => messages::UNKNOWN_ERROR,
                };
                display.show(DisplayContent::error(text));
                fsm.transition(GenerationEvent::TopicRejected)?;
                return Ok(GenerationOutcome::Invalid(reason));
            }
        };

        let Some(_in_flight) = trigger.try_disable() else {
            debug!("Lost {} trigger race to another dispatch", tool);
            fsm.transition(GenerationEvent::Busy)?;
            return Ok(GenerationOutcome::Ignored);
        };

        let request_id = Uuid::new_v4();
        display.show(DisplayContent::normal(messages::placeholder(tool)));
        fsm.transition(GenerationEvent::Dispatched)?;
        info!(%request_id, "Dispatching {} request for topic: {:?}", tool, request.topic());

        let (event, content, outcome) = match self.api.generate(&request).await {
            Ok(ApiReply::Generated(text)) => {
                info!(%request_id, "Received {} of {} bytes", tool, text.len());
                let content = match tool {
                    ToolKind::Joke => DisplayContent::normal(text.clone()),
                    ToolKind::Story => DisplayContent::with_line_breaks(&text),
                };
                (
                    GenerationEvent::Generated,
                    content,
                    GenerationOutcome::Generated(text),
                )
            }
            Ok(ApiReply::Rejected { status, message }) => {
                let message = message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| messages::UNKNOWN_ERROR.to_string());
                warn!(%request_id, "API error {} for {}: {}", status, tool, message);
                (
                    GenerationEvent::ApiRejected,
                    DisplayContent::error(message.clone()),
                    GenerationOutcome::ApiError { status, message },
                )
            }
            Err(Error::UnexpectedResponse { field }) => {
                error!(%request_id, "Response for {} is missing field `{}`", tool, field);
                (
                    GenerationEvent::ResponseMalformed,
                    DisplayContent::error(messages::UNEXPECTED_RESPONSE),
                    GenerationOutcome::UnexpectedResponse,
                )
            }
            Err(e) => {
                error!(%request_id, "Error fetching {}: {}", tool, e);
                (
                    GenerationEvent::TransportLost,
                    DisplayContent::error(messages::connection_lost(tool)),
                    GenerationOutcome::TransportError,
                )
            }
        };

        display.show(content);
        fsm.transition(event)?;
        fsm.transition(GenerationEvent::Settled)?;
        Ok(outcome)
    }
}

/// What handling a [`PageEvent`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum EventResult {
    Generation(GenerationOutcome),
    SliderLabel(String),
    Unhandled,
}
