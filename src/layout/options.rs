//! Layout options and configuration.

use crate::model::{Font, LineKind, Metadata};

/// Font and size used for one kind of line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font face
    pub font: Font,
    /// Font size in points
    pub size: f32,
}

impl TextStyle {
    /// Create a new text style.
    pub const fn new(font: Font, size: f32) -> Self {
        Self { font, size }
    }
}

/// Style table mapping each line kind to a text style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSheet {
    /// `# ` lines
    pub heading1: TextStyle,
    /// `## ` lines
    pub heading2: TextStyle,
    /// `- ` lines
    pub bullet: TextStyle,
    /// Everything else
    pub body: TextStyle,
}

impl StyleSheet {
    /// Look up the style for a line kind.
    pub fn get(&self, kind: LineKind) -> TextStyle {
        match kind {
            LineKind::Heading1 => self.heading1,
            LineKind::Heading2 => self.heading2,
            LineKind::Bullet => self.bullet,
            LineKind::Body => self.body,
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            heading1: TextStyle::new(Font::HelveticaBold, 16.0),
            heading2: TextStyle::new(Font::HelveticaBold, 14.0),
            bullet: TextStyle::new(Font::Helvetica, 12.0),
            body: TextStyle::new(Font::Helvetica, 12.0),
        }
    }
}

/// Vertical spacing applied after a bullet item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletSpacing {
    /// Bullets only consume their own lines; consecutive items sit one line
    /// apart while every other kind of line is followed by paragraph spacing.
    #[default]
    Compact,
    /// Bullets get the same paragraph spacing as every other line.
    Uniform,
}

/// Options for laying out text onto pages.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Page width in points
    pub page_width: f32,

    /// Page height in points
    pub page_height: f32,

    /// Baseline of the first line on each page
    pub top: f32,

    /// X origin of every run
    pub left_margin: f32,

    /// A run is never drawn with its baseline below this
    pub bottom_margin: f32,

    /// Wrap width for bullet and body lines
    pub max_width: f32,

    /// Cursor step per drawn wrapped line
    pub line_height: f32,

    /// Extra cursor step after a line
    pub paragraph_spacing: f32,

    /// Glyph replacing the `- ` prefix
    pub bullet_glyph: char,

    /// Bullet spacing rule
    pub bullet_spacing: BulletSpacing,

    /// Fonts and sizes per line kind
    pub styles: StyleSheet,

    /// Metadata attached to rendered documents
    pub metadata: Metadata,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the top baseline.
    ///
    /// [`LayoutEngine::new`](super::LayoutEngine::new) raises a value below
    /// the bottom margin to the margin.
    pub fn with_top(mut self, top: f32) -> Self {
        self.top = top;
        self
    }

    /// Set the left margin.
    pub fn with_left_margin(mut self, margin: f32) -> Self {
        self.left_margin = margin;
        self
    }

    /// Set the bottom margin.
    pub fn with_bottom_margin(mut self, margin: f32) -> Self {
        self.bottom_margin = margin;
        self
    }

    /// Set the wrap width.
    pub fn with_max_width(mut self, width: f32) -> Self {
        self.max_width = width;
        self
    }

    /// Set the line height.
    pub fn with_line_height(mut self, height: f32) -> Self {
        self.line_height = height;
        self
    }

    /// Set the paragraph spacing.
    pub fn with_paragraph_spacing(mut self, spacing: f32) -> Self {
        self.paragraph_spacing = spacing;
        self
    }

    /// Set the bullet glyph.
    pub fn with_bullet_glyph(mut self, glyph: char) -> Self {
        self.bullet_glyph = glyph;
        self
    }

    /// Set the bullet spacing rule.
    pub fn with_bullet_spacing(mut self, spacing: BulletSpacing) -> Self {
        self.bullet_spacing = spacing;
        self
    }

    /// Set the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Whether a line of this kind is followed by paragraph spacing.
    pub fn spacing_after(&self, kind: LineKind) -> bool {
        kind != LineKind::Bullet || self.bullet_spacing == BulletSpacing::Uniform
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            top: 750.0,
            left_margin: 50.0,
            bottom_margin: 50.0,
            max_width: 500.0,
            line_height: 20.0,
            paragraph_spacing: 20.0,
            bullet_glyph: '\u{2022}',
            bullet_spacing: BulletSpacing::Compact,
            styles: StyleSheet::default(),
            metadata: Metadata::default(),
        }
    }
}
