use crate::{
    api::{GenerationRequest, JokeRequest, StoryRequest, ToolKind},
    page::InputSnapshot,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("topic is blank")]
    EmptyTopic,

    #[error("story parameters were not captured")]
    MissingStoryParams,
}

/// Builds the request for `tool` from a snapshot. The topic is sent
/// exactly as typed; only the blank check trims it.
pub fn build_request(
    tool: ToolKind,
    snapshot: &InputSnapshot,
) -> Result<GenerationRequest, ValidationError> {
    if snapshot.topic.trim().is_empty() {
        return Err(ValidationError::EmptyTopic);
    }

    let topic = snapshot.topic.clone();
    match tool {
        ToolKind::Joke => Ok(GenerationRequest::Joke(JokeRequest { topic })),
        ToolKind::Story => {
            let params = snapshot.story.ok_or(ValidationError::MissingStoryParams)?;
            Ok(GenerationRequest::Story(StoryRequest {
                topic,
                temperature: params.temperature,
                max_tokens: params.max_tokens,
            }))
        }
    }
}
