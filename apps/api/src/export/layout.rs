//! Pagination sweep. Places a `Resume` onto a `DrawingSurface` top to bottom.
//!
//! # Algorithm
//! - A cursor `y` starts at the top margin of page 1.
//! - Before any block of known height is placed, `ensure_room` checks
//!   `y + height > page_height - margin`; on overflow a page is added and `y`
//!   resets to the top margin.
//! - One pass, greedy, no backtracking: no widow/orphan control, no reflow.
//! - Block heights are `line_count × line_height` (12pt body, 14pt role lines).
//!
//! The sweep only reads from the resume and the surface's page size, so running
//! it twice on the same inputs yields identical pages and cursor positions.

use serde::Serialize;

use crate::export::font_metrics::FontStyle;
use crate::export::surface::{Align, DrawingSurface, Font};
use crate::export::ExportError;
use crate::models::{ContactInfo, EducationEntry, Resume, WorkExperienceEntry};

pub const MARGIN_PT: f32 = 40.0;

const BODY_LINE_HEIGHT: f32 = 12.0;
const ROLE_LINE_HEIGHT: f32 = 14.0;
const NAME_ADVANCE: f32 = 28.0;
const CONTACT_ADVANCE: f32 = 30.0;
const HEADING_RULE_GAP: f32 = 5.0;
const HEADING_ADVANCE: f32 = 15.0;
const PARAGRAPH_GAP: f32 = 10.0;
const ENTRY_GAP: f32 = 10.0;
const EDUCATION_ADVANCE: f32 = 20.0;
const BULLET_GLYPH_OFFSET: f32 = 5.0;
const BULLET_TEXT_INDENT: f32 = 15.0;

/// Space reserved before a section heading, so a heading is not stranded
/// without at least a little content below it.
const SECTION_RESERVE: f32 = 50.0;
const EXPERIENCE_RESERVE: f32 = 60.0;
const EDUCATION_RESERVE: f32 = 40.0;

const BULLET: &str = "\u{2022}";

const NAME_FONT: Font = Font {
    style: FontStyle::Bold,
    size_pt: 24.0,
};
const HEADING_FONT: Font = Font {
    style: FontStyle::Bold,
    size_pt: 14.0,
};
const ROLE_FONT: Font = Font {
    style: FontStyle::Bold,
    size_pt: 11.0,
};
const ROLE_DETAIL_FONT: Font = Font {
    style: FontStyle::Normal,
    size_pt: 11.0,
};
const ORG_FONT: Font = Font {
    style: FontStyle::Italic,
    size_pt: 10.0,
};
const BODY_FONT: Font = Font {
    style: FontStyle::Normal,
    size_pt: 10.0,
};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Name,
    ContactLine,
    Heading { title: &'static str },
    Summary,
    Experience { entry: usize },
    Responsibility { entry: usize, index: usize },
    Education { entry: usize },
    Skills,
}

/// Where a block landed: page number (1-based), cursor `y` at its first
/// baseline, and how many lines it took.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub block: Block,
    pub page: u32,
    pub y: f32,
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub pages: u32,
    pub placements: Vec<Placement>,
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `resume` on `surface` in the fixed section order.
///
/// The first surface error aborts the sweep and is returned as-is.
pub fn layout_resume<S: DrawingSurface>(
    resume: &Resume,
    surface: &mut S,
) -> Result<LayoutReport, ExportError> {
    let mut sweep = Sweep::new(surface);

    sweep.header(&resume.contact_info)?;
    sweep.summary(&resume.summary)?;

    sweep.heading("Work Experience")?;
    for (i, entry) in resume.work_experience.iter().enumerate() {
        sweep.experience(i, entry)?;
    }

    sweep.heading("Education")?;
    for (i, entry) in resume.education.iter().enumerate() {
        sweep.education(i, entry)?;
    }

    sweep.skills(&resume.skills)?;

    Ok(sweep.finish())
}

// ────────────────────────────────────────────────────────────────────────────
// Sweep state
// ────────────────────────────────────────────────────────────────────────────

struct Sweep<'a, S: DrawingSurface> {
    surface: &'a mut S,
    page_height: f32,
    left: f32,
    right: f32,
    y: f32,
    page: u32,
    placements: Vec<Placement>,
}

impl<'a, S: DrawingSurface> Sweep<'a, S> {
    fn new(surface: &'a mut S) -> Self {
        let size = surface.page_size();
        Self {
            surface,
            page_height: size.height,
            left: MARGIN_PT,
            right: size.width - MARGIN_PT,
            y: MARGIN_PT,
            page: 1,
            placements: Vec::new(),
        }
    }

    fn usable_width(&self) -> f32 {
        self.right - self.left
    }

    fn ensure_room(&mut self, needed: f32) -> Result<(), ExportError> {
        if self.y + needed > self.page_height - MARGIN_PT {
            self.surface.add_page()?;
            self.page += 1;
            self.y = MARGIN_PT;
        }
        Ok(())
    }

    fn place(&mut self, block: Block, lines: usize) {
        self.placements.push(Placement {
            block,
            page: self.page,
            y: self.y,
            lines,
        });
    }

    /// Draws a non-empty run; empty runs are skipped but still occupy their slot.
    fn text(&mut self, text: &str, x: f32, align: Align) -> Result<(), ExportError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        self.surface.draw_text(text, x, self.y, align)
    }

    fn lines(&mut self, lines: &[String], x: f32) -> Result<(), ExportError> {
        for (i, line) in lines.iter().enumerate() {
            let y = self.y + i as f32 * BODY_LINE_HEIGHT;
            self.surface.draw_text(line, x, y, Align::Left)?;
        }
        Ok(())
    }

    // ── sections ────────────────────────────────────────────────────────────

    fn header(&mut self, contact: &ContactInfo) -> Result<(), ExportError> {
        self.surface.set_font(NAME_FONT);
        self.place(Block::Name, 1);
        self.text(&contact.name, self.left, Align::Left)?;
        self.y += NAME_ADVANCE;

        self.surface.set_font(BODY_FONT);
        self.place(Block::ContactLine, 1);
        self.text(&contact.contact_line(), self.left, Align::Left)?;
        self.y += CONTACT_ADVANCE;
        Ok(())
    }

    fn heading(&mut self, title: &'static str) -> Result<(), ExportError> {
        self.ensure_room(SECTION_RESERVE)?;
        self.surface.set_font(HEADING_FONT);
        self.place(Block::Heading { title }, 1);
        self.text(title, self.left, Align::Left)?;
        self.y += HEADING_RULE_GAP;
        self.surface.draw_line(self.left, self.y, self.right, self.y)?;
        self.y += HEADING_ADVANCE;
        Ok(())
    }

    /// Wrapped body paragraph at full width.
    fn paragraph(&mut self, block: Block, text: &str) -> Result<(), ExportError> {
        self.surface.set_font(BODY_FONT);
        let lines = self.surface.split_text_to_size(text, self.usable_width());
        self.ensure_room(lines.len() as f32 * BODY_LINE_HEIGHT)?;
        self.place(block, lines.len());
        self.lines(&lines, self.left)?;
        self.y += lines.len() as f32 * BODY_LINE_HEIGHT;
        Ok(())
    }

    fn summary(&mut self, summary: &str) -> Result<(), ExportError> {
        self.heading("Summary")?;
        self.paragraph(Block::Summary, summary)?;
        self.y += PARAGRAPH_GAP;
        Ok(())
    }

    fn experience(&mut self, index: usize, entry: &WorkExperienceEntry) -> Result<(), ExportError> {
        self.ensure_room(EXPERIENCE_RESERVE)?;
        self.place(Block::Experience { entry: index }, 2);

        self.surface.set_font(ROLE_FONT);
        self.text(&entry.job_title, self.left, Align::Left)?;
        self.surface.set_font(ROLE_DETAIL_FONT);
        self.text(&entry.dates, self.right, Align::Right)?;
        self.y += ROLE_LINE_HEIGHT;

        self.surface.set_font(ORG_FONT);
        self.text(&entry.company, self.left, Align::Left)?;
        self.text(&entry.location, self.right, Align::Right)?;
        self.y += ROLE_LINE_HEIGHT;

        self.surface.set_font(BODY_FONT);
        let bullet_width = self.usable_width() - BULLET_TEXT_INDENT;
        for (i, responsibility) in entry.responsibilities.iter().enumerate() {
            let lines = self.surface.split_text_to_size(responsibility, bullet_width);
            if lines.is_empty() {
                continue;
            }
            self.ensure_room(lines.len() as f32 * BODY_LINE_HEIGHT)?;
            self.place(
                Block::Responsibility {
                    entry: index,
                    index: i,
                },
                lines.len(),
            );
            self.surface
                .draw_text(BULLET, self.left + BULLET_GLYPH_OFFSET, self.y, Align::Left)?;
            self.lines(&lines, self.left + BULLET_TEXT_INDENT)?;
            self.y += lines.len() as f32 * BODY_LINE_HEIGHT;
        }

        self.y += ENTRY_GAP;
        Ok(())
    }

    fn education(&mut self, index: usize, entry: &EducationEntry) -> Result<(), ExportError> {
        self.ensure_room(EDUCATION_RESERVE)?;
        self.place(Block::Education { entry: index }, 2);

        self.surface.set_font(ROLE_FONT);
        self.text(&entry.degree, self.left, Align::Left)?;
        self.surface.set_font(ROLE_DETAIL_FONT);
        self.text(&entry.graduation_date, self.right, Align::Right)?;
        self.y += ROLE_LINE_HEIGHT;

        self.surface.set_font(ORG_FONT);
        self.text(&entry.institution, self.left, Align::Left)?;
        self.text(&entry.location, self.right, Align::Right)?;
        self.y += EDUCATION_ADVANCE;
        Ok(())
    }

    fn skills(&mut self, skills: &[String]) -> Result<(), ExportError> {
        self.heading("Skills")?;
        let joined = skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        self.paragraph(Block::Skills, &joined)
    }

    fn finish(self) -> LayoutReport {
        LayoutReport {
            pages: self.page,
            placements: self.placements,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::surface::{DrawOp, PageSize, RecordingSurface};
    use crate::models::{ContactInfo, EducationEntry, WorkExperienceEntry};

    fn make_resume() -> Resume {
        Resume {
            contact_info: ContactInfo {
                name: "Margaret Hamilton".to_string(),
                phone: "555-0142".to_string(),
                email: "margaret@example.com".to_string(),
                linkedin: String::new(),
                portfolio: String::new(),
            },
            summary: "Software engineer who led flight software development for Apollo."
                .to_string(),
            work_experience: vec![WorkExperienceEntry {
                job_title: "Director, Software Engineering".to_string(),
                company: "MIT Instrumentation Laboratory".to_string(),
                location: "Cambridge, MA".to_string(),
                dates: "1961 - 1972".to_string(),
                responsibilities: vec![
                    "Led the team that wrote the on-board flight software".to_string(),
                    "Introduced priority scheduling to recover from overload".to_string(),
                ],
            }],
            education: vec![EducationEntry {
                degree: "BA Mathematics".to_string(),
                institution: "Earlham College".to_string(),
                location: "Richmond, IN".to_string(),
                graduation_date: "1958".to_string(),
            }],
            skills: vec!["Real-time systems".to_string(), "Assembly".to_string()],
        }
    }

    /// ~200 characters of ordinary prose.
    fn long_responsibility() -> String {
        let text = "Coordinated verification of the guidance computer software across \
                    simulation rigs, hardware-in-the-loop benches and integrated vehicle \
                    tests, cutting the defect escape rate by forty percent over two years";
        assert!(text.len() >= 200);
        text.to_string()
    }

    fn page_breaks_before(ops: &[DrawOp], target_text: &str) -> usize {
        ops.iter()
            .take_while(|op| !matches!(op, DrawOp::Text { text, .. } if text == target_text))
            .filter(|op| matches!(op, DrawOp::PageBreak { .. }))
            .count()
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let mut surface = RecordingSurface::new(PageSize::A4);
        let report = layout_resume(&make_resume(), &mut surface).unwrap();

        let headings: Vec<&str> = report
            .placements
            .iter()
            .filter_map(|p| match p.block {
                Block::Heading { title } => Some(title),
                _ => None,
            })
            .collect();
        assert_eq!(
            headings,
            vec!["Summary", "Work Experience", "Education", "Skills"]
        );
        assert_eq!(report.placements[0].block, Block::Name);
        assert_eq!(report.placements[0].y, MARGIN_PT);
        assert_eq!(report.pages, 1);
    }

    #[test]
    fn test_contact_line_omits_empty_linkedin_and_portfolio() {
        let mut surface = RecordingSurface::new(PageSize::A4);
        layout_resume(&make_resume(), &mut surface).unwrap();

        let texts: Vec<&str> = surface.texts().collect();
        assert_eq!(texts[1], "555-0142 | margaret@example.com");
        assert!(!texts.iter().any(|t| t.contains("|  |") || t.ends_with('|')));
    }

    #[test]
    fn test_dates_and_locations_are_right_aligned() {
        let mut surface = RecordingSurface::new(PageSize::A4);
        layout_resume(&make_resume(), &mut surface).unwrap();

        let right_edge = PageSize::A4.width - MARGIN_PT;
        let right_aligned: Vec<&str> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text {
                    text,
                    x,
                    align: Align::Right,
                    ..
                } => {
                    assert_eq!(*x, right_edge);
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            right_aligned,
            vec!["1961 - 1972", "Cambridge, MA", "1958", "Richmond, IN"]
        );
    }

    #[test]
    fn test_skills_are_comma_joined() {
        let mut surface = RecordingSurface::new(PageSize::A4);
        layout_resume(&make_resume(), &mut surface).unwrap();
        assert_eq!(surface.texts().last(), Some("Real-time systems, Assembly"));
    }

    #[test]
    fn test_each_heading_draws_a_rule() {
        let mut surface = RecordingSurface::new(PageSize::A4);
        layout_resume(&make_resume(), &mut surface).unwrap();
        let rules = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count();
        assert_eq!(rules, 4);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut resume = make_resume();
        for i in 0..12 {
            resume.work_experience.push(WorkExperienceEntry {
                job_title: format!("Engineer {i}"),
                company: "Draper Laboratory".to_string(),
                location: "Cambridge, MA".to_string(),
                dates: "1972 - 1976".to_string(),
                responsibilities: vec![long_responsibility(); 3],
            });
        }

        let mut first = RecordingSurface::new(PageSize::A4);
        let mut second = RecordingSurface::new(PageSize::A4);
        let a = layout_resume(&resume, &mut first).unwrap();
        let b = layout_resume(&resume, &mut second).unwrap();

        assert!(a.pages > 1, "fixture should span several pages");
        assert_eq!(a, b);
        assert_eq!(first.ops(), second.ops());
    }

    #[test]
    fn test_long_responsibility_breaks_page_once_before_bullet() {
        let mut resume = make_resume();
        resume.work_experience[0].responsibilities = vec![long_responsibility()];
        let bullet_key = Block::Responsibility { entry: 0, index: 0 };

        // A narrow page makes the bullet wrap to several lines.
        let tall = PageSize {
            width: 300.0,
            height: 2000.0,
        };
        let mut probe = RecordingSurface::new(tall);
        let probe_report = layout_resume(&resume, &mut probe).unwrap();
        let bullet = probe_report
            .placements
            .iter()
            .find(|p| p.block == bullet_key)
            .unwrap()
            .clone();
        assert!(bullet.lines >= 3, "expected a multi-line bullet, got {}", bullet.lines);
        assert_eq!(bullet.page, 1);

        // Shrink the page so the bullet overflows by a single point.
        let bullet_bottom = bullet.y + bullet.lines as f32 * BODY_LINE_HEIGHT;
        let short = PageSize {
            width: 300.0,
            height: bullet_bottom + MARGIN_PT - 1.0,
        };
        let mut surface = RecordingSurface::new(short);
        let report = layout_resume(&resume, &mut surface).unwrap();

        let placed = report
            .placements
            .iter()
            .find(|p| p.block == bullet_key)
            .unwrap();
        assert_eq!(placed.page, 2);
        assert_eq!(placed.y, MARGIN_PT);
        assert_eq!(placed.lines, bullet.lines);
        assert_eq!(page_breaks_before(surface.ops(), BULLET), 1);

        // Everything before the bullet kept its original position.
        for (before, after) in probe_report.placements.iter().zip(&report.placements) {
            if before.block == bullet_key {
                break;
            }
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_empty_location_is_not_drawn() {
        let mut resume = make_resume();
        resume.education[0].location = String::new();
        let mut surface = RecordingSurface::new(PageSize::A4);
        layout_resume(&resume, &mut surface).unwrap();
        assert!(!surface.texts().any(|t| t.is_empty()));
        assert!(!surface.texts().any(|t| t == "Richmond, IN"));
    }

    struct FailingSurface {
        inner: RecordingSurface,
        fail_on_page: u32,
    }

    impl DrawingSurface for FailingSurface {
        fn page_size(&self) -> PageSize {
            self.inner.page_size()
        }
        fn set_font(&mut self, font: Font) {
            self.inner.set_font(font)
        }
        fn font(&self) -> Font {
            self.inner.font()
        }
        fn draw_text(&mut self, text: &str, x: f32, y: f32, align: Align) -> Result<(), ExportError> {
            self.inner.draw_text(text, x, y, align)
        }
        fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<(), ExportError> {
            self.inner.draw_line(x1, y1, x2, y2)
        }
        fn add_page(&mut self) -> Result<(), ExportError> {
            if self.inner.page_count() + 1 == self.fail_on_page {
                return Err(ExportError::Pdf("page limit reached".to_string()));
            }
            self.inner.add_page()
        }
    }

    #[test]
    fn test_surface_error_aborts_sweep() {
        let mut resume = make_resume();
        resume.work_experience[0].responsibilities = vec![long_responsibility(); 80];
        let mut surface = FailingSurface {
            inner: RecordingSurface::new(PageSize::A4),
            fail_on_page: 2,
        };

        let result = layout_resume(&resume, &mut surface);
        assert!(matches!(result, Err(ExportError::Pdf(_))));
        assert!(!surface.inner.texts().any(|t| t == "Education"));
    }
}
