mod client;
pub mod types;

pub use client::{GenerationApi, HttpGenerationApi};
pub use types::{
    ApiReply, ErrorBody, GenerationRequest, JokeRequest, PunResponse, StoryRequest,
    StoryResponse, ToolKind,
};
