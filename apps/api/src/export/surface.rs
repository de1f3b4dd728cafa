//! The drawing capability the layout sweep runs against.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and `y` growing downwards; `y` is the text baseline. Backends that use
//! a different origin convert internally.

use serde::Serialize;

use crate::export::font_metrics::{get_metrics, FontStyle};
use crate::export::ExportError;

/// A4 in points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: A4_WIDTH_PT,
        height: A4_HEIGHT_PT,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// `x` is the left edge of the run.
    Left,
    /// `x` is the right edge of the run.
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    pub style: FontStyle,
    pub size_pt: f32,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            style: FontStyle::Normal,
            size_pt: 10.0,
        }
    }
}

pub trait DrawingSurface {
    fn page_size(&self) -> PageSize;

    fn set_font(&mut self, font: Font);

    fn font(&self) -> Font;

    /// Wraps `text` in the current font into lines no wider than `max_width`.
    fn split_text_to_size(&self, text: &str, max_width: f32) -> Vec<String> {
        let font = self.font();
        get_metrics(font.style).wrap(text, font.size_pt, max_width)
    }

    /// Width of `text` in the current font.
    fn text_width(&self, text: &str) -> f32 {
        let font = self.font();
        get_metrics(font.style).width_pt(text, font.size_pt)
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: Align) -> Result<(), ExportError>;

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), ExportError>;

    fn add_page(&mut self) -> Result<(), ExportError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Recording surface
// ────────────────────────────────────────────────────────────────────────────

/// One recorded draw call. Serialized as part of a layout preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        page: u32,
        text: String,
        x: f32,
        y: f32,
        align: Align,
        font: Font,
    },
    Line {
        page: u32,
        from: (f32, f32),
        to: (f32, f32),
    },
    PageBreak {
        new_page: u32,
    },
}

/// Records draw calls instead of producing a document.
///
/// Drives layout previews and lets tests assert exactly what the sweep drew.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: PageSize,
    font: Font,
    page: u32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            font: Font::default(),
            page: 1,
            ops: Vec::new(),
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    #[cfg(test)]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text runs in drawing order.
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn page_size(&self) -> PageSize {
        self.size
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn font(&self) -> Font {
        self.font
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: Align) -> Result<(), ExportError> {
        self.ops.push(DrawOp::Text {
            page: self.page,
            text: text.to_string(),
            x,
            y,
            align,
            font: self.font,
        });
        Ok(())
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), ExportError> {
        self.ops.push(DrawOp::Line {
            page: self.page,
            from: (x1, y1),
            to: (x2, y2),
        });
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), ExportError> {
        self.page += 1;
        self.ops.push(DrawOp::PageBreak {
            new_page: self.page,
        });
        Ok(())
    }
}
