use super::types::*;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Remote side of a generation exchange.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// Performs exactly one exchange for `request`.
    ///
    /// `Ok` means a JSON body came back, whatever the status. Transport and
    /// parse failures surface as [`Error::Network`] / [`Error::Serialization`],
    /// and a success body without the expected text field as
    /// [`Error::UnexpectedResponse`].
    async fn generate(&self, request: &GenerationRequest) -> Result<ApiReply>;
}

pub struct HttpGenerationApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGenerationApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!("Creating generation API client for: {}", base_url);

        // No timeout: a request runs until it completes or fails.
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, tool: ToolKind) -> String {
        format!("{}{}", self.base_url, tool.endpoint())
    }
}

#[async_trait]
impl GenerationApi for HttpGenerationApi {
    async fn generate(&self, request: &GenerationRequest) -> Result<ApiReply> {
        let tool = request.tool();
        let url = self.url_for(tool);
        debug!("POST {} for {} request", url, tool);

        // `.json` sets `Content-Type: application/json` and nothing else.
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        // Both success and error bodies are expected to be JSON.
        let data: Value = serde_json::from_slice(&body)?;

        if !status.is_success() {
            // A missing, empty or non-string `error` falls back to the generic message.
            let message = serde_json::from_value::<ErrorBody>(data)
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty());
            warn!("Generation API rejected {} request with status {}", tool, status);
            return Ok(ApiReply::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        parse_generated(tool, data).map(ApiReply::Generated)
    }
}

fn parse_generated(tool: ToolKind, data: Value) -> Result<String> {
    let unexpected = || Error::UnexpectedResponse {
        field: tool.success_field(),
    };
    match tool {
        ToolKind::Joke => serde_json::from_value::<PunResponse>(data)
            .map(|body| body.pun)
            .map_err(|_| unexpected()),
        ToolKind::Story => serde_json::from_value::<StoryResponse>(data)
            .map(|body| body.story)
            .map_err(|_| unexpected()),
    }
}
