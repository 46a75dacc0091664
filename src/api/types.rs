use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two generator tools a page or request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Joke,
    Story,
}

impl ToolKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Joke => "/api/get-pun",
            Self::Story => "/api/generate-story",
        }
    }

    /// Field of a successful response body that carries the generated text.
    pub fn success_field(self) -> &'static str {
        match self {
            Self::Joke => "pun",
            Self::Story => "story",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joke => write!(f, "joke"),
            Self::Story => write!(f, "story"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JokeRequest {
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRequest {
    pub topic: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationRequest {
    Joke(JokeRequest),
    Story(StoryRequest),
}

impl GenerationRequest {
    pub fn tool(&self) -> ToolKind {
        match self {
            Self::Joke(_) => ToolKind::Joke,
            Self::Story(_) => ToolKind::Story,
        }
    }

    pub fn topic(&self) -> &str {
        match self {
            Self::Joke(request) => &request.topic,
            Self::Story(request) => &request.topic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunResponse {
    pub pun: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryResponse {
    pub story: String,
}

/// Body of a non-success response. `error` is optional because the
/// server is not obliged to send it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of an exchange that completed with a parseable JSON body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply {
    Generated(String),
    Rejected { status: u16, message: Option<String> },
}
