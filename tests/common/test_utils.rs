use std::sync::Arc;
use topic_muse::{
    api::{GenerationApi, HttpGenerationApi},
    config::StoryConfig,
    generator::Generator,
    page::Page,
};

/// Joke page wired to a real HTTP client pointed at `base_url`.
pub fn joke_generator(base_url: &str) -> Generator {
    Generator::new(
        Arc::new(Page::joke()),
        Arc::new(HttpGenerationApi::new(base_url)),
    )
}

/// Story page with default sliders wired to `base_url`.
pub fn story_generator(base_url: &str) -> Generator {
    Generator::new(
        Arc::new(Page::story(&StoryConfig::default())),
        Arc::new(HttpGenerationApi::new(base_url)),
    )
}

pub fn generator_with_api(page: Page, api: Arc<dyn GenerationApi>) -> Generator {
    Generator::new(Arc::new(page), api)
}

/// Base URL of a port nothing listens on, so connecting fails.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().expect("Failed to read throwaway address");
    drop(listener);
    format!("http://{addr}")
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
api:
  base_url: "http://127.0.0.1:5050/"

logs:
  level: "debug"

story:
  temperature:
    min: 0.0
    max: 2.0
    step: 0.05
    default: 1.0
  max_tokens:
    min: 16
    max: 1024
    step: 16
    default: 256
"#;

/// Configuration whose slider default falls outside its range
pub const INVALID_SLIDER_YAML: &str = r#"
story:
  max_tokens:
    min: 50
    max: 500
    step: 10
    default: 900
"#;
