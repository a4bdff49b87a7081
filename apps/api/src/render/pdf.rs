//! Text-only PDF 1.4 export.
//!
//! # Pipeline
//! - `layout_lines` turns a validated résumé into wrapped, positioned-in-x
//!   text lines in fixed section order. Text is first folded into
//!   WinAnsi (see `winansi`) so measurement sees the glyphs that are drawn.
//! - `paginate` assigns baselines and breaks pages at the bottom margin.
//! - `write_pdf` serializes pages with the two standard Helvetica faces
//!   (WinAnsi encoding), an Info dictionary and a cross-reference table.
//!
//! CPU-bound; callers on the async runtime use `spawn_blocking`.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::models::resume::{display_end_date, Resume};
use crate::render::metrics::{get_metrics, FontFace, PageConfig};
use crate::render::winansi::{fold_to_win_ansi, win_ansi_byte};

const PRODUCER: &str = concat!("resume-api ", env!("CARGO_PKG_VERSION"));
const BULLET: &str = "\u{2022} ";
const ENTRY_GAP_PT: f32 = 4.0;

/// Identity stamped into the exported file.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub face: FontFace,
    pub size_pt: f32,
    pub x_pt: f32,
    /// Vertical space requested above this line; dropped at the top of a page.
    pub gap_before_pt: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub line: TextLine,
    pub y_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

struct LayoutBuilder<'a> {
    config: &'a PageConfig,
    lines: Vec<TextLine>,
    pending_gap: f32,
    unmapped: usize,
}

impl<'a> LayoutBuilder<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            lines: Vec::new(),
            pending_gap: 0.0,
            unmapped: 0,
        }
    }

    fn fold<'t>(&mut self, text: &'t str) -> Cow<'t, str> {
        let folded = fold_to_win_ansi(text);
        self.unmapped += folded.unmapped;
        folded.text
    }

    fn gap(&mut self, pt: f32) {
        self.pending_gap += pt;
    }

    fn push(&mut self, text: String, face: FontFace, size_pt: f32, x_pt: f32) {
        self.lines.push(TextLine {
            text,
            face,
            size_pt,
            x_pt,
            gap_before_pt: std::mem::take(&mut self.pending_gap),
        });
    }

    fn paragraph(&mut self, text: &str, face: FontFace, size_pt: f32) {
        let text = self.fold(text);
        let width_em = self.config.text_width_pt() / size_pt;
        for line in get_metrics(face).wrap(&text, width_em) {
            self.push(line, face, size_pt, self.config.margin_pt);
        }
    }

    fn centered(&mut self, text: &str, face: FontFace, size_pt: f32) {
        let text = self.fold(text);
        let metrics = get_metrics(face);
        let text_width = self.config.text_width_pt();
        for line in metrics.wrap(&text, text_width / size_pt) {
            let line_width = metrics.measure_str(&line) * size_pt;
            let x = self.config.margin_pt + ((text_width - line_width) / 2.0).max(0.0);
            self.push(line, face, size_pt, x);
        }
    }

    fn heading(&mut self, title: &str) {
        self.gap(self.config.section_gap_pt);
        self.paragraph(title, FontFace::Bold, self.config.heading_size_pt);
    }

    /// Hanging-indent bullet: the glyph sits left of the indent, wrapped
    /// continuation lines align with the first line's text.
    fn bullet(&mut self, text: &str) {
        let text = self.fold(text);
        let size = self.config.body_size_pt;
        let metrics = get_metrics(FontFace::Regular);
        let indent_x = self.config.margin_pt + self.config.bullet_indent_pt;
        let bullet_x = indent_x - metrics.measure_str(BULLET) * size;
        let width_em = (self.config.text_width_pt() - self.config.bullet_indent_pt) / size;

        for (i, line) in metrics.wrap(&text, width_em).into_iter().enumerate() {
            if i == 0 {
                self.push(format!("{BULLET}{line}"), FontFace::Regular, size, bullet_x);
            } else {
                self.push(line, FontFace::Regular, size, indent_x);
            }
        }
    }

    fn finish(self) -> Vec<TextLine> {
        if self.unmapped > 0 {
            warn!(
                characters = self.unmapped,
                "characters with no PDF glyph were exported as '?'"
            );
        }
        self.lines
    }
}

/// Lays out a résumé as text lines in fixed section order.
pub fn layout_lines(resume: &Resume, config: &PageConfig) -> Vec<TextLine> {
    let body = config.body_size_pt;
    let mut b = LayoutBuilder::new(config);

    let h = &resume.header;
    b.centered(&h.name, FontFace::Bold, config.name_size_pt);
    b.centered(&h.title, FontFace::Regular, body);
    b.centered(&format!("{} | {}", h.email, h.phone), FontFace::Regular, body);
    b.centered(&h.location, FontFace::Regular, body);

    b.heading("EXPERTISE");
    b.paragraph(&resume.expertise.summary, FontFace::Regular, body);

    b.heading("SKILLS");
    b.paragraph(&resume.skills.skills, FontFace::Regular, body);

    b.heading("EXPERIENCE");
    for (i, exp) in resume.experience.iter().enumerate() {
        if i > 0 {
            b.gap(ENTRY_GAP_PT);
        }
        b.paragraph(&format!("{} - {}", exp.company, exp.position), FontFace::Bold, body);
        b.paragraph(
            &format!(
                "{} - {}",
                exp.start_date,
                display_end_date(exp.end_date.as_deref())
            ),
            FontFace::Regular,
            body,
        );
        for item in &exp.responsibilities {
            b.bullet(item);
        }
    }

    b.heading("PROJECT EXPERIENCE");
    for (i, project) in resume.projects.iter().enumerate() {
        if i > 0 {
            b.gap(ENTRY_GAP_PT);
        }
        b.paragraph(&project.name, FontFace::Bold, body);
        b.paragraph(
            &format!(
                "{} - {}",
                project.start_date,
                display_end_date(project.end_date.as_deref())
            ),
            FontFace::Regular,
            body,
        );
        b.paragraph(&project.description, FontFace::Regular, body);
        b.paragraph(
            &format!("Technologies: {}", project.technologies),
            FontFace::Regular,
            body,
        );
    }

    b.heading("EDUCATION");
    for (i, edu) in resume.education.iter().enumerate() {
        if i > 0 {
            b.gap(ENTRY_GAP_PT);
        }
        b.paragraph(&format!("{} - {}", edu.institution, edu.degree), FontFace::Bold, body);
        b.paragraph(&edu.field_of_study, FontFace::Regular, body);
        let graduated = match &edu.gpa {
            Some(gpa) => format!("Graduated: {} | GPA: {}", edu.graduation_date, gpa),
            None => format!("Graduated: {}", edu.graduation_date),
        };
        b.paragraph(&graduated, FontFace::Regular, body);
    }

    if !resume.awards.is_empty() {
        b.heading("AWARDS");
        for (i, award) in resume.awards.iter().enumerate() {
            if i > 0 {
                b.gap(ENTRY_GAP_PT);
            }
            b.paragraph(
                &format!("{} - {}", award.title, award.organization),
                FontFace::Bold,
                body,
            );
            b.paragraph(&award.date, FontFace::Regular, body);
            if let Some(description) = &award.description {
                b.paragraph(description, FontFace::Regular, body);
            }
        }
    }

    b.finish()
}

/// Assigns baselines top-down and starts a new page whenever the next line
/// would cross the bottom margin. Always returns at least one page.
pub fn paginate(lines: Vec<TextLine>, config: &PageConfig) -> Vec<Page> {
    let top = config.page_height_pt - config.margin_pt;
    let bottom = config.margin_pt;
    let mut pages = vec![Page::default()];
    let mut cursor = top;

    for line in lines {
        let advance = line.size_pt * config.line_spacing;
        let mut gap = line.gap_before_pt;

        let page_has_lines = pages.last().is_some_and(|p| !p.lines.is_empty());
        if !page_has_lines {
            gap = 0.0;
        } else if cursor - gap - advance < bottom {
            pages.push(Page::default());
            cursor = top;
            gap = 0.0;
        }

        cursor -= gap + advance;
        let y_pt = cursor + (advance - line.size_pt);
        if let Some(page) = pages.last_mut() {
            page.lines.push(PlacedLine { line, y_pt });
        }
    }

    pages
}

pub fn layout_pages(resume: &Resume, config: &PageConfig) -> Vec<Page> {
    paginate(layout_lines(resume, config), config)
}

// ────────────────────────────────────────────────────────────────────────────
// Serialization
// ────────────────────────────────────────────────────────────────────────────

/// Encodes text as the body of a PDF literal string (without parentheses).
pub fn encode_pdf_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let byte = win_ansi_byte(c)
            .or_else(|| c.is_whitespace().then_some(b' '))
            .unwrap_or(b'?');
        match byte {
            b @ (b'(' | b')' | b'\\') => {
                out.push(b'\\');
                out.push(b);
            }
            b @ 0x20..=0x7E => out.push(b),
            b => out.extend_from_slice(format!("\\{b:03o}").as_bytes()),
        }
    }
    out
}

fn pdf_date(at: &DateTime<Utc>) -> String {
    format!("D:{}Z", at.format("%Y%m%d%H%M%S"))
}

struct PdfWriter {
    buf: Vec<u8>,
    /// Byte offset of object `n` at index `n - 1`.
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        Self {
            buf: b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec(),
            offsets: Vec::new(),
        }
    }

    /// Objects must be written in id order, starting at 1.
    fn object(&mut self, body: &[u8]) -> usize {
        let id = self.offsets.len() + 1;
        self.offsets.push(self.buf.len());
        self.buf.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
        id
    }

    fn stream(&mut self, content: &[u8]) -> usize {
        let mut body = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(b"\nendstream");
        self.object(&body)
    }

    fn finish(mut self, root: usize, info: usize, file_id: &str) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let size = self.offsets.len() + 1;
        self.buf
            .extend_from_slice(format!("xref\n0 {size}\n0000000000 65535 f \n").as_bytes());
        for offset in &self.offsets {
            self.buf
                .extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        self.buf.extend_from_slice(
            format!(
                "trailer\n<< /Size {size} /Root {root} 0 R /Info {info} 0 R /ID [<{file_id}> <{file_id}>] >>\nstartxref\n{xref_offset}\n%%EOF\n"
            )
            .as_bytes(),
        );
        self.buf
    }
}

fn content_stream(page: &Page) -> Vec<u8> {
    let mut out = Vec::new();
    for placed in &page.lines {
        let line = &placed.line;
        out.extend_from_slice(
            format!(
                "BT /{} {:.2} Tf {:.2} {:.2} Td (",
                line.face.resource_name(),
                line.size_pt,
                line.x_pt,
                placed.y_pt
            )
            .as_bytes(),
        );
        out.extend_from_slice(&encode_pdf_text(&line.text));
        out.extend_from_slice(b") Tj ET\n");
    }
    out
}

fn literal(text: &str) -> Vec<u8> {
    let mut out = vec![b'('];
    out.extend_from_slice(&encode_pdf_text(text));
    out.push(b')');
    out
}

fn write_pdf(pages: &[Page], config: &PageConfig, title: &str, meta: &DocumentMeta) -> Vec<u8> {
    // Fixed object layout: 1 catalog, 2 page tree, 3-4 fonts, 5 info,
    // then (page, content) pairs from 6.
    const FIRST_PAGE_ID: usize = 6;
    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_ID + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    let mut w = PdfWriter::new();
    let catalog = w.object(b"<< /Type /Catalog /Pages 2 0 R >>");
    w.object(format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()).as_bytes());
    for face in [FontFace::Regular, FontFace::Bold] {
        w.object(
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                face.base_font()
            )
            .as_bytes(),
        );
    }

    let mut info = b"<< /Title ".to_vec();
    info.extend_from_slice(&literal(title));
    info.extend_from_slice(b" /Producer ");
    info.extend_from_slice(&literal(PRODUCER));
    info.extend_from_slice(b" /CreationDate ");
    info.extend_from_slice(&literal(&pdf_date(&meta.created_at)));
    info.extend_from_slice(b" >>");
    let info_id = w.object(&info);

    for page in pages {
        let page_id = w.offsets.len() + 1;
        w.object(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                config.page_width_pt,
                config.page_height_pt,
                page_id + 1
            )
            .as_bytes(),
        );
        w.stream(&content_stream(page));
    }

    w.finish(catalog, info_id, &meta.id.simple().to_string())
}

/// Renders a validated résumé to PDF bytes.
pub fn render_pdf(resume: &Resume, config: &PageConfig, meta: &DocumentMeta) -> Vec<u8> {
    let pages = layout_pages(resume, config);
    let title = format!("Resume - {}", resume.header.name);
    write_pdf(&pages, config, &fold_to_win_ansi(&title).text, meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::valid_resume;
    use crate::render::metrics::default_page_config;
    use crate::validation::validate;
    use chrono::TimeZone;
    use serde_json::json;

    fn resume_from(raw: serde_json::Value) -> Resume {
        validate(raw.as_object().unwrap()).expect("fixture should validate")
    }

    fn meta() -> DocumentMeta {
        DocumentMeta {
            id: Uuid::nil(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn long_resume() -> Resume {
        let mut raw = valid_resume();
        let entry = raw["experience"][0].clone();
        raw["experience"] = json!(vec![entry; 30]);
        resume_from(raw)
    }

    #[test]
    fn test_encode_pdf_text_escapes() {
        assert_eq!(encode_pdf_text("a (b) \\"), b"a \\(b\\) \\\\".to_vec());
        assert_eq!(encode_pdf_text("José"), b"Jos\\351".to_vec());
        assert_eq!(encode_pdf_text("\u{2022} x"), b"\\225 x".to_vec());
        assert_eq!(encode_pdf_text("Šimon"), b"\\212imon".to_vec());
        assert_eq!(encode_pdf_text("a\tb"), b"a b".to_vec());
    }

    #[test]
    fn test_non_win_ansi_letters_are_folded() {
        let mut raw = valid_resume();
        raw["header"]["name"] = json!("Łukasz Wałęsa");
        raw["header"]["title"] = json!("Инженер");
        raw["experience"][0]["company"] = json!("Ωmega Şirketi");
        let resume = resume_from(raw);
        let config = default_page_config();

        let lines = layout_lines(&resume, &config);
        assert_eq!(lines[0].text, "Lukasz Walesa");
        assert_eq!(lines[1].text, "Inzhener");
        assert!(lines.iter().any(|l| l.text == "Omega Sirketi - Staff Engineer"));
        assert!(lines.iter().all(|l| !l.text.contains('?')));

        let bytes = render_pdf(&resume, &config, &meta());
        assert!(find(&bytes, b"(Lukasz Walesa) Tj").is_some());
        assert!(find(&bytes, b"/Title (Resume - Lukasz Walesa)").is_some());
    }

    #[test]
    fn test_lines_stay_inside_right_margin() {
        let url = "https://example.com/projects/ledger-sync/architecture/decisions/0001-event-sourcing";
        let mut raw = valid_resume();
        raw["header"]["name"] = json!("W".repeat(100));
        raw["skills"]["skills"] = json!(
            "Rust,Python,PostgreSQL,Kubernetes,AWS,Terraform,Docker,Redis,Kafka,GraphQL,\
             TypeScript,React,Elasticsearch,Prometheus,Grafana,Ansible,Jenkins"
        );
        raw["projects"][0]["description"] = json!(format!("Design notes live at {url}"));
        raw["experience"][0]["responsibilities"][0] = json!(format!("Documented {url}{url}"));
        let config = default_page_config();
        let right_edge = config.page_width_pt - config.margin_pt;

        for page in layout_pages(&resume_from(raw), &config) {
            for placed in &page.lines {
                let line = &placed.line;
                let width = get_metrics(line.face).measure_str(&line.text) * line.size_pt;
                assert!(
                    line.x_pt + width <= right_edge + 1e-2,
                    "{:?} ends at {:.1}pt, past {right_edge}pt",
                    line.text,
                    line.x_pt + width
                );
            }
        }
    }

    #[test]
    fn test_layout_section_order() {
        let config = default_page_config();
        let lines = layout_lines(&resume_from(valid_resume()), &config);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        let headings: Vec<&str> = texts
            .iter()
            .copied()
            .filter(|t| {
                matches!(
                    *t,
                    "EXPERTISE" | "SKILLS" | "EXPERIENCE" | "PROJECT EXPERIENCE" | "EDUCATION" | "AWARDS"
                )
            })
            .collect();
        assert_eq!(
            headings,
            vec!["EXPERTISE", "SKILLS", "EXPERIENCE", "PROJECT EXPERIENCE", "EDUCATION", "AWARDS"]
        );
        assert_eq!(texts[0], "Jane Doe");
        assert!(texts.contains(&"\u{2022} Led development of the billing platform"));
        assert!(texts.contains(&"Graduated: MAY 2018 | GPA: 3.8"));
    }

    #[test]
    fn test_layout_omits_empty_awards() {
        let mut raw = valid_resume();
        raw["awards"] = json!([]);
        let lines = layout_lines(&resume_from(raw), &default_page_config());
        assert!(lines.iter().all(|l| l.text != "AWARDS"));
    }

    #[test]
    fn test_lines_stay_inside_margins() {
        let config = default_page_config();
        let pages = layout_pages(&long_resume(), &config);
        for page in &pages {
            for placed in &page.lines {
                assert!(placed.y_pt >= config.margin_pt);
                assert!(placed.y_pt <= config.page_height_pt - config.margin_pt);
                assert!(placed.line.x_pt >= config.margin_pt);
            }
        }
    }

    #[test]
    fn test_short_resume_fits_one_page_long_resume_paginates() {
        let config = default_page_config();
        assert_eq!(layout_pages(&resume_from(valid_resume()), &config).len(), 1);
        let pages = layout_pages(&long_resume(), &config);
        assert!(pages.len() > 1);
        assert!(pages.iter().all(|p| !p.lines.is_empty()));
        // A page break discards the pending gap.
        assert!(pages[1].lines[0].y_pt > pages[1].lines[1].y_pt);
    }

    #[test]
    fn test_pdf_structure_and_xref_offsets() {
        let bytes = render_pdf(&resume_from(valid_resume()), &default_page_config(), &meta());
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(find(&bytes, b"(Jane Doe) Tj").is_some());
        assert!(find(&bytes, b"/CreationDate (D:20260102030405Z)").is_some());
        assert!(find(&bytes, b"/Count 1 ").is_some());

        let start = find(&bytes, b"startxref\n").unwrap() + "startxref\n".len();
        let tail = std::str::from_utf8(&bytes[start..]).unwrap();
        let xref_offset: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(bytes[xref_offset..].starts_with(b"xref\n0 8\n"));

        let table = std::str::from_utf8(&bytes[xref_offset..start]).unwrap();
        let entries: Vec<&str> = table.lines().skip(3).take(7).collect();
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let header = format!("{} 0 obj\n", i + 1);
            assert!(bytes[offset..].starts_with(header.as_bytes()), "object {}", i + 1);
        }
    }

    #[test]
    fn test_stream_length_matches_content() {
        let bytes = render_pdf(&resume_from(valid_resume()), &default_page_config(), &meta());
        let marker = b"<< /Length ";
        let at = find(&bytes, marker).unwrap() + marker.len();
        let rest = std::str::from_utf8(&bytes[at..at + 12]).unwrap();
        let length: usize = rest.split_whitespace().next().unwrap().parse().unwrap();
        let stream_start = find(&bytes[at..], b"stream\n").unwrap() + at + "stream\n".len();
        assert!(bytes[stream_start + length..].starts_with(b"\nendstream"));
    }

    #[test]
    fn test_rendering_is_deterministic_for_same_meta() {
        let resume = resume_from(valid_resume());
        let config = default_page_config();
        assert_eq!(
            render_pdf(&resume, &config, &meta()),
            render_pdf(&resume, &config, &meta())
        );
    }

    #[test]
    fn test_text_extracts_back_out() {
        let bytes = render_pdf(&resume_from(valid_resume()), &default_page_config(), &meta());
        let text = pdf_extract::extract_text_from_mem(&bytes).expect("pdf should parse");
        assert!(text.contains("EXPERTISE"));
        assert!(text.contains("Jane"));
    }

    #[test]
    fn test_folded_name_extracts_back_out() {
        let mut raw = valid_resume();
        raw["header"]["name"] = json!("Łukasz Wałęsa");
        let bytes = render_pdf(&resume_from(raw), &default_page_config(), &meta());
        let text = pdf_extract::extract_text_from_mem(&bytes).expect("pdf should parse");
        assert!(text.contains("Lukasz"));
        assert!(!text.contains('?'));
    }
}
