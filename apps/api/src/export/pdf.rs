//! `printpdf` backend for the drawing capability.
//!
//! Uses the built-in Helvetica faces, so no font files are embedded. The
//! surface works in top-left points and converts to PDF's bottom-left
//! millimetre coordinates at draw time. Not `Send`: build and finish it on a
//! single (blocking) thread.

use std::borrow::Cow;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Pt,
};

use crate::export::font_metrics::FontStyle;
use crate::export::surface::{Align, DrawingSurface, Font, PageSize};
use crate::export::ExportError;

const LAYER_NAME: &str = "Content";
const RULE_THICKNESS_PT: f32 = 1.0;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Normal => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.oblique,
        }
    }
}

pub struct PdfSurface {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    size: PageSize,
    font: Font,
}

impl PdfSurface {
    pub fn new(title: &str, size: PageSize) -> Result<Self, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, to_mm(size.width), to_mm(size.height), LAYER_NAME);

        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_err)?,
            oblique: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(pdf_err)?,
        };
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            fonts,
            size,
            font: Font::default(),
        })
    }

    /// Serializes the finished document.
    pub fn finish(self) -> Result<Vec<u8>, ExportError> {
        self.doc.save_to_bytes().map_err(pdf_err)
    }

    fn flip_y(&self, y: f32) -> Mm {
        to_mm(self.size.height - y)
    }
}

impl DrawingSurface for PdfSurface {
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
        let text = winansi_safe(text);
        let x = match align {
            Align::Left => x,
            Align::Right => x - self.text_width(&text),
        };
        self.layer.use_text(
            text.into_owned(),
            self.font.size_pt,
            to_mm(x),
            self.flip_y(y),
            self.fonts.get(self.font.style),
        );
        Ok(())
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), ExportError> {
        let line = Line {
            points: vec![
                (Point::new(to_mm(x1), self.flip_y(y1)), false),
                (Point::new(to_mm(x2), self.flip_y(y2)), false),
            ],
            is_closed: false,
        };
        self.layer.set_outline_thickness(RULE_THICKNESS_PT);
        self.layer.add_line(line);
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), ExportError> {
        let (page, layer) = self.doc.add_page(
            to_mm(self.size.width),
            to_mm(self.size.height),
            LAYER_NAME,
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        Ok(())
    }
}

fn to_mm(pt: f32) -> Mm {
    Mm::from(Pt(pt))
}

fn pdf_err(e: printpdf::Error) -> ExportError {
    ExportError::Pdf(e.to_string())
}

/// Characters cp1252 places in 0x80..=0x9F. Together with printable ASCII and
/// U+00A0..=U+00FF these are everything WinAnsiEncoding can show.
const WINANSI_EXTRAS: [char; 27] = [
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}',
    '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
    '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
];

fn is_winansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WINANSI_EXTRAS.contains(&c)
}

/// lopdf silently drops characters WinAnsiEncoding cannot represent. Near
/// lookalikes are mapped to their WinAnsi form, control characters become
/// spaces, and anything else becomes `?`.
fn winansi_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_winansi) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| match c {
                c if is_winansi(c) => c,
                '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2212}' => '-',
                '\u{2015}' => '\u{2014}',
                '\u{201B}' | '\u{2032}' => '\'',
                '\u{201F}' | '\u{2033}' => '"',
                '\u{2023}' | '\u{2043}' | '\u{25CF}' | '\u{25E6}' => '\u{2022}',
                c if c.is_control() => ' ',
                _ => '?',
            })
            .collect(),
    )
}
