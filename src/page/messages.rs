//! Fixed user-facing texts.

use crate::api::ToolKind;

pub const EMPTY_TOPIC: &str = "Please enter a topic!";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const UNEXPECTED_RESPONSE: &str = "The server sent an unexpected response. Please try again!";

/// Shown while a request is in flight.
pub fn placeholder(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::Joke => "Thinking of a good one...",
        ToolKind::Story => "The storyteller is thinking...",
    }
}

/// Shown when the exchange failed before a JSON body was read.
pub fn connection_lost(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::Joke => "Sorry, my humor module is offline. Please try again!",
        ToolKind::Story => "The connection to the storyteller was lost. Please try again!",
    }
}
