use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Error,
}

/// What the display region currently shows: one paragraph made of
/// segments separated by visual line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayContent {
    pub tone: Tone,
    pub segments: Vec<String>,
}

impl DisplayContent {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Normal,
            segments: vec![text.into()],
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            segments: vec![text.into()],
        }
    }

    /// Splits `text` on `\n` so each line becomes its own segment.
    pub fn with_line_breaks(text: &str) -> Self {
        Self {
            tone: Tone::Normal,
            segments: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.tone == Tone::Error
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments joined with spaces, the way the text reads on screen.
    pub fn text(&self) -> String {
        self.segments.join(" ")
    }

    pub fn to_html(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let body = self
            .segments
            .iter()
            .map(|segment| html_escape(segment))
            .collect::<Vec<_>>()
            .join("<br>");
        match self.tone {
            Tone::Normal => format!("<p>{body}</p>"),
            Tone::Error => format!(r#"<p style="color: red;">{body}</p>"#),
        }
    }

    pub fn to_terminal(&self) -> String {
        let body = self.segments.join("\n");
        match self.tone {
            Tone::Normal => body,
            Tone::Error => format!("[error] {body}"),
        }
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// The area generated text and error messages are written to.
#[derive(Debug, Default)]
pub struct DisplayRegion {
    content: Mutex<DisplayContent>,
}

impl DisplayRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever is shown; the last writer wins.
    pub fn show(&self, content: DisplayContent) {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = content;
    }

    pub fn content(&self) -> DisplayContent {
        self.content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
