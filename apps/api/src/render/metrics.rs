//! Static font-metric tables for the two PDF base fonts used by the export.
//!
//! Widths are in em units (AFM widths / 1000) for Helvetica and
//! Helvetica-Bold. Tables cover ASCII 0x20..=0x7E; index = (char as usize) - 32.
//! Outside ASCII: a few punctuation marks have exact widths, accented letters
//! take the width of their base letter, everything else is measured at the
//! widest WinAnsi glyph so a wrapped line never under-measures.

use serde::{Deserialize, Serialize};

use crate::render::winansi::latin_base;

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// Resource name used inside page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters for exported pages. All lengths are in PDF points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub body_size_pt: f32,
    pub heading_size_pt: f32,
    pub name_size_pt: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub line_spacing: f32,
    /// Extra space before each section heading.
    pub section_gap_pt: f32,
    pub bullet_indent_pt: f32,
}

impl PageConfig {
    pub fn text_width_pt(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }
}

/// US letter (8.5" × 11"), 0.75" margins, 10.5pt body.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_pt: 612.0,
        page_height_pt: 792.0,
        margin_pt: 54.0,
        body_size_pt: 10.5,
        heading_size_pt: 12.0,
        name_size_pt: 18.0,
        line_spacing: 1.3,
        section_gap_pt: 8.0,
        bullet_indent_pt: 14.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetricTable {
    widths: [f32; 95],
    /// Exact widths for non-ASCII glyphs the export commonly emits.
    specials: &'static [(char, f32)],
    /// Width for characters with no better estimate.
    pub fallback_char_width: f32,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        if let Some(&(_, w)) = self.specials.iter().find(|(s, _)| *s == c) {
            return w;
        }
        match latin_base(c) {
            Some(base) => self.char_width(base),
            None => self.fallback_char_width,
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Greedy word wrap at `max_width_em`. Whitespace runs collapse to one
    /// space. A token wider than the line is broken after its commas, and
    /// any piece still too wide is broken between characters; the pieces
    /// of one token are joined without a space when they share a line.
    pub fn wrap(&self, s: &str, max_width_em: f32) -> Vec<String> {
        let mut lines = LineFiller::new(max_width_em);
        let space_width = self.measure_str(" ");

        for word in s.split_whitespace() {
            let word_w = self.measure_str(word);
            if word_w <= max_width_em {
                lines.place(word, word_w, space_width);
                continue;
            }
            for (i, piece) in self.break_token(word, max_width_em).iter().enumerate() {
                let gap = if i == 0 { space_width } else { 0.0 };
                lines.place(piece, self.measure_str(piece), gap);
            }
        }
        lines.finish()
    }

    /// Splits an overlong token into pieces no wider than `max_width_em`
    /// (a single glyph wider than the line stays on its own).
    fn break_token<'a>(&self, token: &'a str, max_width_em: f32) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        for segment in token.split_inclusive(',') {
            if self.measure_str(segment) <= max_width_em {
                pieces.push(segment);
                continue;
            }
            let mut start = 0;
            let mut width = 0.0_f32;
            for (at, c) in segment.char_indices() {
                let w = self.char_width(c);
                if at > start && width + w > max_width_em {
                    pieces.push(&segment[start..at]);
                    start = at;
                    width = 0.0;
                }
                width += w;
            }
            pieces.push(&segment[start..]);
        }
        pieces
    }
}

/// Accumulates pieces into lines no wider than `max_width_em`.
struct LineFiller {
    max_width_em: f32,
    lines: Vec<String>,
    current: String,
    current_width: f32,
}

impl LineFiller {
    fn new(max_width_em: f32) -> Self {
        Self {
            max_width_em,
            lines: Vec::new(),
            current: String::new(),
            current_width: 0.0,
        }
    }

    /// Appends `piece`, preceded by a space when `gap` is non-zero, or
    /// starts a new line when it would not fit.
    fn place(&mut self, piece: &str, width: f32, gap: f32) {
        if self.current.is_empty() {
            self.current.push_str(piece);
            self.current_width = width;
        } else if self.current_width + gap + width > self.max_width_em {
            self.lines.push(std::mem::take(&mut self.current));
            self.current.push_str(piece);
            self.current_width = width;
        } else {
            if gap > 0.0 {
                self.current.push(' ');
            }
            self.current.push_str(piece);
            self.current_width += gap + width;
        }
    }

    fn finish(mut self) -> Vec<String> {
        if !self.current.is_empty() {
            self.lines.push(self.current);
        }
        self.lines
    }
}

/// Returns the static metric table for a font face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Regular => &HELVETICA_TABLE,
        FontFace::Bold => &HELVETICA_BOLD_TABLE,
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0-9
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

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0-9
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
];

const HELVETICA_SPECIALS: &[(char, f32)] = &[
    ('\u{A0}', 0.278),
    ('•', 0.350),
    ('–', 0.556),
    ('—', 1.000),
    ('‘', 0.222),
    ('’', 0.222),
    ('“', 0.333),
    ('”', 0.333),
    ('…', 1.000),
];

const HELVETICA_BOLD_SPECIALS: &[(char, f32)] = &[
    ('\u{A0}', 0.278),
    ('•', 0.350),
    ('–', 0.556),
    ('—', 1.000),
    ('‘', 0.278),
    ('’', 0.278),
    ('“', 0.500),
    ('”', 0.500),
    ('…', 1.000),
];

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_WIDTHS,
    specials: HELVETICA_SPECIALS,
    fallback_char_width: 1.0,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_BOLD_WIDTHS,
    specials: HELVETICA_BOLD_SPECIALS,
    fallback_char_width: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_known_widths() {
        let m = get_metrics(FontFace::Regular);
        assert!((m.measure_str("A") - 0.667).abs() < 1e-6);
        assert!((m.measure_str("ii") - 0.444).abs() < 1e-6);
        assert!((m.measure_str("é") - m.measure_str("e")).abs() < 1e-6);
        assert!((m.measure_str("•") - 0.350).abs() < 1e-6);
        assert!((m.measure_str("日") - m.fallback_char_width).abs() < 1e-6);
        assert!(
            get_metrics(FontFace::Bold).measure_str("Resume")
                > get_metrics(FontFace::Regular).measure_str("Resume")
        );
        // Narrow bold glyphs are proportionally much wider than regular ones.
        assert!((get_metrics(FontFace::Bold).measure_str("il") - 0.556).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let m = get_metrics(FontFace::Regular);
        assert_eq!(m.wrap("Jane   Doe", 40.0), vec!["Jane Doe".to_string()]);
        assert!(m.wrap("   ", 40.0).is_empty());
    }

    #[test]
    fn test_wrap_respects_width() {
        let m = get_metrics(FontFace::Regular);
        let text = "Designed and operated an event sourced ledger that reconciled card payments across three regions";
        let max = 12.0;
        let lines = m.wrap(text, max);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(m.measure_str(line) <= max + 1e-3, "{line:?} overflows");
        }
        assert_eq!(lines.join(" "), text);
    }

    fn assert_fits(m: &FontMetricTable, lines: &[String], max: f32) {
        for line in lines {
            assert!(m.measure_str(line) <= max + 1e-3, "{line:?} overflows {max}em");
        }
    }

    #[test]
    fn test_wrap_breaks_overlong_word_by_width() {
        let m = get_metrics(FontFace::Regular);
        let text = "a Supercalifragilisticexpialidocious b";
        let lines = m.wrap(text, 3.0);
        assert!(lines.len() > 3);
        assert_fits(m, &lines, 3.0);
        assert_eq!(lines.first().map(String::as_str), Some("a"));
        assert_eq!(lines.last().map(String::as_str), Some("b"));
        assert_eq!(lines.concat().replace(' ', ""), text.replace(' ', ""));
    }

    #[test]
    fn test_wrap_breaks_unspaced_skills_after_commas() {
        let m = get_metrics(FontFace::Regular);
        let skills = "Rust,Python,PostgreSQL,Kubernetes,AWS,Terraform,Docker,Redis,Kafka,GraphQL,\
                      TypeScript,React,Elasticsearch,Prometheus,Grafana,Ansible,Jenkins";
        let lines = m.wrap(skills, 20.0);
        assert!(lines.len() > 1);
        assert_fits(m, &lines, 20.0);
        assert_eq!(lines.concat(), skills);
        for line in &lines[..lines.len() - 1] {
            assert!(line.ends_with(','), "{line:?} split inside a skill");
        }
    }

    #[test]
    fn test_wrap_breaks_long_url() {
        let m = get_metrics(FontFace::Bold);
        let url = "https://example.com/a/very/long/path/that/has/no/commas/or/spaces/anywhere";
        let lines = m.wrap(&format!("See {url}"), 10.0);
        assert_fits(m, &lines, 10.0);
        assert_eq!(lines[0], "See");
        assert_eq!(lines[1..].concat(), url);
    }

    #[test]
    fn test_default_page_text_width() {
        let config = default_page_config();
        assert!((config.text_width_pt() - 504.0).abs() < 1e-3);
    }
}
