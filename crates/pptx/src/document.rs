//! In-memory presentation document.
//!
//! Layout happens here: every slide becomes a list of absolutely positioned
//! text boxes. Serializing the document to a package is [`crate::package`]'s job.

use deckgen_core::normalize::{truncate_bullet, MAX_BULLET_CHARS};
use deckgen_core::types::MAX_BULLETS;
use deckgen_core::{Slide, ThemeDefinition};

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Slide width in inches.
pub const SLIDE_WIDTH_IN: f64 = 10.0;

/// Slide height in inches.
pub const SLIDE_HEIGHT_IN: f64 = 7.5;

/// Vertical offsets of the bullet slots on content slides, in inches.
const BULLET_SLOTS_Y: [f64; MAX_BULLETS] = [1.0, 1.9, 2.8, 3.7, 4.6];

const BULLET_SLOT_HEIGHT: f64 = 0.9;

/// Convert inches to EMU.
pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

impl Align {
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
        }
    }
}

/// A positioned single-paragraph text box. Geometry is in inches.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub text: String,
    /// Font size in points.
    pub size: u32,
    pub bold: bool,
    pub align: Align,
    pub font: &'static str,
    /// Six-digit hex color.
    pub color: &'static str,
}

impl TextBox {
    fn new(text: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            text: text.into(),
            size: 18,
            bold: false,
            align: Align::Left,
            font: "Calibri",
            color: "000000",
        }
    }

    fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    fn styled(mut self, font: &'static str, color: &'static str) -> Self {
        self.font = font;
        self.color = color;
        self
    }
}

/// One laid-out slide.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSlide {
    /// Background color, six-digit hex.
    pub background: &'static str,
    pub boxes: Vec<TextBox>,
}

/// A laid-out deck ready to be packaged.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub theme: ThemeDefinition,
    pub slides: Vec<DocumentSlide>,
}

impl Document {
    /// Lay out a slide list with a theme.
    ///
    /// The first slide, and any slide typed as a title slide, gets the title
    /// layout. Every other slide gets the content layout.
    pub fn build(slides: &[Slide], theme: &ThemeDefinition, topic: &str, summary: &str) -> Self {
        let content_total = slides.len().saturating_sub(1);

        let slides = slides
            .iter()
            .enumerate()
            .map(|(index, slide)| {
                let boxes = if index == 0 || slide.is_title() {
                    title_layout(slide, theme, content_total, summary)
                } else {
                    content_layout(slide, theme, index, content_total)
                };
                DocumentSlide {
                    background: theme.bg,
                    boxes,
                }
            })
            .collect();

        Self {
            title: topic.to_string(),
            theme: *theme,
            slides,
        }
    }
}

fn title_layout(
    slide: &Slide,
    theme: &ThemeDefinition,
    content_total: usize,
    summary: &str,
) -> Vec<TextBox> {
    vec![
        TextBox::new(&slide.title, 0.5, 2.0, 9.0, 1.5)
            .size(36)
            .bold()
            .centered()
            .styled(theme.fonts.title, theme.title),
        TextBox::new(
            format!("{} Professional Content Slides", content_total),
            0.5,
            3.5,
            9.0,
            0.6,
        )
        .size(18)
        .bold()
        .centered()
        .styled(theme.fonts.title, theme.accent),
        TextBox::new(summary, 0.8, 4.5, 8.4, 1.5)
            .size(14)
            .centered()
            .styled(theme.fonts.body, theme.text),
    ]
}

fn content_layout(
    slide: &Slide,
    theme: &ThemeDefinition,
    index: usize,
    content_total: usize,
) -> Vec<TextBox> {
    let mut boxes = vec![TextBox::new(&slide.title, 0.3, 0.2, 9.4, 0.6)
        .size(18)
        .bold()
        .styled(theme.fonts.title, theme.title)];

    for (bullet, y) in slide.bullets().iter().zip(BULLET_SLOTS_Y) {
        let text = truncate_bullet(bullet, MAX_BULLET_CHARS);
        boxes.push(
            TextBox::new(format!("• {}", text), 0.3, y, 9.4, BULLET_SLOT_HEIGHT)
                .size(11)
                .styled(theme.fonts.body, theme.text),
        );
    }

    boxes.push(
        TextBox::new(format!("{} / {}", index, content_total), 8.7, 6.7, 0.8, 0.25)
            .size(8)
            .centered()
            .styled(theme.fonts.body, theme.accent),
    );
    boxes
}
