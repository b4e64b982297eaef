//! Text run types.

use serde::{Deserialize, Serialize};

/// Classification of one input line in the Markdown-lite dialect.
///
/// Only four forms carry meaning; anything else, including other Markdown
/// syntax, is body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// `# ` prefix
    Heading1,
    /// `## ` prefix
    Heading2,
    /// `- ` prefix
    Bullet,
    /// Everything else
    Body,
}

impl LineKind {
    /// Check if this kind is a heading.
    pub fn is_heading(self) -> bool {
        matches!(self, LineKind::Heading1 | LineKind::Heading2)
    }

    /// Whether lines of this kind are word-wrapped.
    pub fn wraps(self) -> bool {
        !self.is_heading()
    }
}

/// One of the standard PDF Type 1 fonts used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    /// Helvetica regular
    Helvetica,
    /// Helvetica bold
    HelveticaBold,
}

impl Font {
    /// All fonts, in resource order.
    pub const ALL: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

    /// PDF base font name.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }
}

/// A single positioned piece of styled text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Which kind of input line produced this run
    pub style: LineKind,

    /// Font face
    pub font: Font,

    /// Font size in points
    pub size: f32,

    /// Baseline origin, x in points from the left edge
    pub x: f32,

    /// Baseline origin, y in points from the bottom edge
    pub y: f32,
}

impl TextRun {
    /// Create a new text run.
    pub fn new(
        text: impl Into<String>,
        style: LineKind,
        font: Font,
        size: f32,
        x: f32,
        y: f32,
    ) -> Self {
        Self {
            text: text.into(),
            style,
            font,
            size,
            x,
            y,
        }
    }

    /// Check if this run has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
