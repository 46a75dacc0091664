//! Line-oriented front end: each line typed is the topic, Enter triggers.

use crate::{
    Result,
    api::{HttpGenerationApi, ToolKind},
    config::Config,
    generator::{EventResult, GenerationOutcome, Generator, PageEvent},
    page::{Page, Slider},
};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

const HELP: &str = "Type a topic and press Enter. Commands: :temp <value>, :tokens <value>, :quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Topic(String),
    Slider(Slider, String),
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> Command {
    let Some(command) = line.strip_prefix(':') else {
        return Command::Topic(line.to_string());
    };
    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map(|(name, arg)| (name, arg.trim()))
        .unwrap_or((command.trim(), ""));
    match name {
        "temp" | "temperature" => Command::Slider(Slider::Temperature, arg.to_string()),
        "tokens" | "max_tokens" => Command::Slider(Slider::MaxTokens, arg.to_string()),
        "quit" | "q" => Command::Quit,
        "help" => Command::Help,
        // Not a known command: treat it as a topic.
        _ => Command::Topic(line.to_string()),
    }
}

/// Initial slider positions from the command line.
#[derive(Debug, Clone, Default)]
pub struct SliderPresets {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

/// Builds the page for `tool` and wires it to the configured API.
pub fn wire(config: &Config, tool: ToolKind, presets: &SliderPresets) -> Result<Generator> {
    let page = Page::for_tool(tool, &config.story);
    if let Some(temperature) = presets.temperature {
        page.set_slider(Slider::Temperature, &temperature.to_string())?;
    }
    if let Some(max_tokens) = presets.max_tokens {
        page.set_slider(Slider::MaxTokens, &max_tokens.to_string())?;
    }

    let api = HttpGenerationApi::new(config.api.base_url.clone());
    Ok(Generator::new(Arc::new(page), Arc::new(api)))
}

/// Sets the topic, clicks the trigger once and writes the display region.
pub async fn run_once<W>(generator: &Generator, topic: &str, output: &mut W) -> Result<GenerationOutcome>
where
    W: AsyncWrite + Unpin,
{
    generator
        .handle_event(PageEvent::TopicInput(topic.to_string()))
        .await?;
    let outcome = match generator.handle_event(PageEvent::Click).await? {
        EventResult::Generation(outcome) => outcome,
        _ => GenerationOutcome::Ignored,
    };
    write_display(generator, output).await?;
    Ok(outcome)
}

/// Reads lines until EOF or `:quit`.
pub async fn run_session<R, W>(generator: &Generator, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Starting interactive {} session", generator.tool());
    write_line(output, HELP).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Command::Quit => break,
            Command::Help => write_line(output, HELP).await?,
            Command::Slider(slider, value) => {
                let event = PageEvent::SliderInput { slider, value };
                match generator.handle_event(event).await {
                    Ok(EventResult::SliderLabel(label)) => {
                        write_line(output, &format!("{}: {}", slider_name(slider), label)).await?
                    }
                    Ok(_) => {}
                    Err(e) => write_line(output, &format!("[error] {e}")).await?,
                }
            }
            Command::Topic(topic) => {
                generator.handle_event(PageEvent::TopicInput(topic)).await?;
                let result = generator
                    .handle_event(PageEvent::KeyPress("Enter".to_string()))
                    .await?;
                debug!("Key trigger finished with {:?}", result);
                write_display(generator, output).await?;
            }
        }
    }

    info!("Interactive {} session ended", generator.tool());
    Ok(())
}

fn slider_name(slider: Slider) -> &'static str {
    match slider {
        Slider::Temperature => "Temperature",
        Slider::MaxTokens => "Max tokens",
    }
}

async fn write_display<W: AsyncWrite + Unpin>(generator: &Generator, output: &mut W) -> Result<()> {
    let content = generator.page().display().content();
    write_line(output, &content.to_terminal()).await
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
