//! Static font-metric tables for the three Helvetica faces used by the exporter.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard Helvetica AFM files divided by 1000. Line height is fixed by the
//! layout, so only horizontal metrics live here.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font style
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    /// Helvetica.
    Normal,
    /// Helvetica-Bold.
    Bold,
    /// Helvetica-Oblique. Shares its advance widths with the upright face.
    Italic,
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Width of `s` in points at `size_pt`.
    pub fn width_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_pt`.
    ///
    /// Explicit newlines always break. Runs of whitespace collapse to a single
    /// space. A word wider than the line is placed on its own line rather than
    /// split. Blank text yields no lines.
    pub fn wrap(&self, text: &str, size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let max_width = max_width_pt / size_pt;
        let mut lines = Vec::new();

        for paragraph in text.lines() {
            let mut current = String::new();
            let mut current_width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.measure_str(word);
                if current.is_empty() {
                    current.push_str(word);
                    current_width = word_w;
                } else if current_width + self.space_width + word_w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_width = word_w;
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_width += self.space_width + word_w;
                }
            }

            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
const HELVETICA_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :      ;      <      =      >      ?      @
    0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [      \      ]      ^      _      `
    0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
    // {      |      }      ~
    0.334, 0.260, 0.334, 0.584,
];

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_WIDTHS,
    average_char_width: 0.556,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
};

static HELVETICA_OBLIQUE_TABLE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_WIDTHS,
    average_char_width: 0.556,
    space_width: 0.278,
};

/// Returns the static metric table for a given style.
pub fn get_metrics(style: FontStyle) -> &'static FontMetricTable {
    match style {
        FontStyle::Normal => &HELVETICA_TABLE,
        FontStyle::Bold => &HELVETICA_BOLD_TABLE,
        FontStyle::Italic => &HELVETICA_OBLIQUE_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontStyle::Normal);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontStyle::Normal);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontStyle::Normal);
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Senior Software Engineer";
        assert!(
            get_metrics(FontStyle::Bold).measure_str(text)
                > get_metrics(FontStyle::Normal).measure_str(text)
        );
    }

    #[test]
    fn test_oblique_matches_regular_widths() {
        let text = "Acme Corporation";
        assert_eq!(
            get_metrics(FontStyle::Italic).measure_str(text),
            get_metrics(FontStyle::Normal).measure_str(text)
        );
    }

    #[test]
    fn test_width_pt_scales_with_size() {
        let metrics = get_metrics(FontStyle::Normal);
        let at_10 = metrics.width_pt("Skills", 10.0);
        let at_20 = metrics.width_pt("Skills", 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let metrics = get_metrics(FontStyle::Normal);
        let lines = metrics.wrap("Built the billing service", 10.0, 500.0);
        assert_eq!(lines, vec!["Built the billing service".to_string()]);
    }

    #[test]
    fn test_wrap_long_text_respects_width() {
        let metrics = get_metrics(FontStyle::Normal);
        let text = "word ".repeat(60);
        let lines = metrics.wrap(&text, 10.0, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                metrics.width_pt(line, 10.0) <= 200.0 + 1e-3,
                "line too wide: {line}"
            );
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.trim_end());
    }

    #[test]
    fn test_wrap_honours_newlines() {
        let metrics = get_metrics(FontStyle::Normal);
        let lines = metrics.wrap("first line\nsecond line", 10.0, 500.0);
        assert_eq!(lines, vec!["first line", "second line"]);
    }

    #[test]
    fn test_wrap_blank_text_has_no_lines() {
        let metrics = get_metrics(FontStyle::Normal);
        assert!(metrics.wrap("   ", 10.0, 500.0).is_empty());
        assert!(metrics.wrap("", 10.0, 500.0).is_empty());
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let metrics = get_metrics(FontStyle::Normal);
        let url = "https://example.com/".to_string() + &"a".repeat(200);
        let lines = metrics.wrap(&format!("see {url} now"), 10.0, 100.0);
        assert_eq!(lines, vec!["see".to_string(), url, "now".to_string()]);
    }
}
