//! HTML preview of a validated résumé.
//!
//! Section order is fixed: Header → Expertise → Skills → Experience →
//! Projects → Education → Awards (only when non-empty).

use crate::models::resume::{display_end_date, Resume};

pub(crate) const STYLE: &str = "\
body { font-family: 'Times New Roman', serif; margin: 0.5in; }
.header { text-align: center; margin-bottom: 20px; }
.name { font-size: 18px; font-weight: bold; }
.section-header { font-weight: bold; margin-top: 20px; margin-bottom: 10px; border-bottom: 1px solid #000; }
.entry { margin-bottom: 12px; }
.placeholder { color: #888; font-style: italic; }
.validation-error { color: #b00020; margin: 10px 0; }
";

/// Escapes text for element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn document_open(out: &mut String, title: &str) {
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    out.push_str(&format!("<style>\n{STYLE}</style>\n"));
    out.push_str("</head>\n<body>\n");
}

pub(crate) fn document_close(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}

pub(crate) fn section_header(out: &mut String, title: &str) {
    out.push_str(&format!("<div class=\"section-header\">{title}</div>\n"));
}

/// Renders the full preview document.
pub fn render_html(resume: &Resume) -> String {
    let mut out = String::with_capacity(4096);
    document_open(&mut out, "Resume Preview");

    let h = &resume.header;
    out.push_str("<div class=\"header\">\n");
    out.push_str(&format!("<div class=\"name\">{}</div>\n", escape_html(&h.name)));
    out.push_str(&format!("<div>{}</div>\n", escape_html(&h.title)));
    out.push_str(&format!(
        "<div>{} | {}</div>\n",
        escape_html(&h.email),
        escape_html(&h.phone)
    ));
    out.push_str(&format!("<div>{}</div>\n", escape_html(&h.location)));
    out.push_str("</div>\n");

    section_header(&mut out, "EXPERTISE");
    out.push_str(&format!("<p>{}</p>\n", escape_html(&resume.expertise.summary)));

    section_header(&mut out, "SKILLS");
    out.push_str(&format!("<p>{}</p>\n", escape_html(&resume.skills.skills)));

    section_header(&mut out, "EXPERIENCE");
    for exp in &resume.experience {
        out.push_str("<div class=\"entry\">\n");
        out.push_str(&format!(
            "<strong>{} - {}</strong><br>\n",
            escape_html(&exp.company),
            escape_html(&exp.position)
        ));
        out.push_str(&format!(
            "<span>{} - {}</span>\n",
            escape_html(&exp.start_date),
            escape_html(display_end_date(exp.end_date.as_deref()))
        ));
        out.push_str("<ul>\n");
        for item in &exp.responsibilities {
            out.push_str(&format!("<li>{}</li>\n", escape_html(item)));
        }
        out.push_str("</ul>\n</div>\n");
    }

    section_header(&mut out, "PROJECT EXPERIENCE");
    for project in &resume.projects {
        out.push_str("<div class=\"entry\">\n");
        out.push_str(&format!("<strong>{}</strong><br>\n", escape_html(&project.name)));
        out.push_str(&format!(
            "<span>{} - {}</span>\n",
            escape_html(&project.start_date),
            escape_html(display_end_date(project.end_date.as_deref()))
        ));
        out.push_str(&format!("<p>{}</p>\n", escape_html(&project.description)));
        out.push_str(&format!(
            "<p>Technologies: {}</p>\n",
            escape_html(&project.technologies)
        ));
        out.push_str("</div>\n");
    }

    section_header(&mut out, "EDUCATION");
    for edu in &resume.education {
        out.push_str("<div class=\"entry\">\n");
        out.push_str(&format!(
            "<strong>{} - {}</strong><br>\n",
            escape_html(&edu.institution),
            escape_html(&edu.degree)
        ));
        out.push_str(&format!("<span>{}</span><br>\n", escape_html(&edu.field_of_study)));
        out.push_str(&format!("<span>Graduated: {}", escape_html(&edu.graduation_date)));
        if let Some(gpa) = &edu.gpa {
            out.push_str(&format!(" | GPA: {}", escape_html(gpa)));
        }
        out.push_str("</span>\n</div>\n");
    }

    if !resume.awards.is_empty() {
        section_header(&mut out, "AWARDS");
        for award in &resume.awards {
            out.push_str("<div class=\"entry\">\n");
            out.push_str(&format!(
                "<strong>{} - {}</strong><br>\n",
                escape_html(&award.title),
                escape_html(&award.organization)
            ));
            out.push_str(&format!("<span>{}</span>\n", escape_html(&award.date)));
            if let Some(description) = &award.description {
                out.push_str(&format!("<p>{}</p>\n", escape_html(description)));
            }
            out.push_str("</div>\n");
        }
    }

    document_close(&mut out);
    out
}
