mod controls;
mod display;
pub mod messages;

pub use controls::{InFlightGuard, RangeControl, TopicField, TriggerControl};
pub use display::{DisplayContent, DisplayRegion, Tone};

use crate::{Error, Result, api::ToolKind, config::StoryConfig};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Story generation parameters read from the sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoryParams {
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Control values captured at the moment generation is triggered.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    pub topic: String,
    pub story: Option<StoryParams>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Temperature,
    MaxTokens,
}

#[derive(Debug)]
struct StorySliders {
    temperature: RangeControl,
    max_tokens: RangeControl,
}

/// The controls of one tool page. Joke and story pages share nothing.
#[derive(Debug)]
pub struct Page {
    tool: ToolKind,
    topic: TopicField,
    sliders: Option<Mutex<StorySliders>>,
    trigger: TriggerControl,
    display: DisplayRegion,
}

impl Page {
    pub fn joke() -> Self {
        Self::with_sliders(ToolKind::Joke, None)
    }

    pub fn story(config: &StoryConfig) -> Self {
        let sliders = StorySliders {
            temperature: RangeControl::new("temperature", &config.temperature),
            max_tokens: RangeControl::new("max_tokens", &config.max_tokens),
        };
        Self::with_sliders(ToolKind::Story, Some(Mutex::new(sliders)))
    }

    pub fn for_tool(tool: ToolKind, config: &StoryConfig) -> Self {
        match tool {
            ToolKind::Joke => Self::joke(),
            ToolKind::Story => Self::story(config),
        }
    }

    fn with_sliders(tool: ToolKind, sliders: Option<Mutex<StorySliders>>) -> Self {
        Self {
            tool,
            topic: TopicField::default(),
            sliders,
            trigger: TriggerControl::default(),
            display: DisplayRegion::new(),
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn topic(&self) -> &TopicField {
        &self.topic
    }

    pub fn trigger(&self) -> &TriggerControl {
        &self.trigger
    }

    pub fn display(&self) -> &DisplayRegion {
        &self.display
    }

    /// Moves a slider and returns its refreshed value label.
    pub fn set_slider(&self, slider: Slider, input: &str) -> Result<String> {
        let mut sliders = self.sliders()?;
        let control = match slider {
            Slider::Temperature => &mut sliders.temperature,
            Slider::MaxTokens => &mut sliders.max_tokens,
        };
        control.set_from_str(input)?;
        Ok(control.label().to_string())
    }

    pub fn slider_label(&self, slider: Slider) -> Result<String> {
        let sliders = self.sliders()?;
        Ok(match slider {
            Slider::Temperature => sliders.temperature.label().to_string(),
            Slider::MaxTokens => sliders.max_tokens.label().to_string(),
        })
    }

    /// Reads every input without touching it.
    pub fn snapshot(&self) -> InputSnapshot {
        let story = self.sliders.as_ref().map(|sliders| {
            let sliders = sliders.lock().unwrap_or_else(PoisonError::into_inner);
            StoryParams {
                temperature: sliders.temperature.value(),
                max_tokens: sliders.max_tokens.as_integer(),
            }
        });
        InputSnapshot {
            topic: self.topic.text(),
            story,
        }
    }

    fn sliders(&self) -> Result<MutexGuard<'_, StorySliders>> {
        self.sliders
            .as_ref()
            .map(|sliders| sliders.lock().unwrap_or_else(PoisonError::into_inner))
            .ok_or_else(|| Error::config(format!("the {} page has no sliders", self.tool)))
    }
}
