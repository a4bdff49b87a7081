//! Best-effort preview for payloads that failed validation.
//!
//! Works directly on the raw JSON: whatever strings are present are shown,
//! everything absent or malformed gets a placeholder. This output is
//! presentation scaffolding only and must never be treated as validated data.

use serde_json::{Map, Value};

use crate::render::html::{document_close, document_open, escape_html, section_header};

const INCOMPLETE_BANNER: &str =
    "Resume validation incomplete. Please fix errors and complete all required sections.";

fn text_or<'a>(map: Option<&'a Map<String, Value>>, key: &str, placeholder: &'a str) -> Placed<'a> {
    match map.and_then(|m| m.get(key)).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Placed::Given(s),
        _ => Placed::Missing(placeholder),
    }
}

enum Placed<'a> {
    Given(&'a str),
    Missing(&'a str),
}

impl Placed<'_> {
    fn html(&self) -> String {
        match self {
            Placed::Given(s) => escape_html(s),
            Placed::Missing(p) => format!("<span class=\"placeholder\">{}</span>", escape_html(p)),
        }
    }
}

fn placeholder_block(out: &mut String, text: &str) {
    out.push_str(&format!("<p class=\"placeholder\">{}</p>\n", escape_html(text)));
}

/// Objects of a list section, skipping malformed elements.
fn entries<'a>(raw: &'a Map<String, Value>, key: &str) -> Vec<&'a Map<String, Value>> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default()
}

/// Renders whatever fragments of a résumé are present. Never fails.
pub fn render_partial_html(raw: &Value) -> String {
    let empty = Map::new();
    let raw = raw.as_object().unwrap_or(&empty);
    let mut out = String::with_capacity(2048);

    document_open(&mut out, "Resume Preview - Incomplete");
    out.push_str(&format!("<div class=\"validation-error\">{INCOMPLETE_BANNER}</div>\n"));

    let header = raw.get("header").and_then(Value::as_object);
    out.push_str("<div class=\"header\">\n");
    out.push_str(&format!(
        "<div class=\"name\">{}</div>\n",
        text_or(header, "name", "Name not provided").html()
    ));
    out.push_str(&format!(
        "<div>{}</div>\n",
        text_or(header, "title", "Title not provided").html()
    ));
    out.push_str(&format!(
        "<div>{} | {}</div>\n",
        text_or(header, "email", "Email not provided").html(),
        text_or(header, "phone", "Phone not provided").html()
    ));
    out.push_str(&format!(
        "<div>{}</div>\n",
        text_or(header, "location", "Location not provided").html()
    ));
    out.push_str("</div>\n");

    section_header(&mut out, "EXPERTISE");
    let expertise = raw.get("expertise").and_then(Value::as_object);
    out.push_str(&format!(
        "<p>{}</p>\n",
        text_or(expertise, "summary", "Summary not provided").html()
    ));

    section_header(&mut out, "SKILLS");
    let skills = raw.get("skills").and_then(Value::as_object);
    out.push_str(&format!("<p>{}</p>\n", text_or(skills, "skills", "Skills not provided").html()));

    section_header(&mut out, "EXPERIENCE");
    let experience = entries(raw, "experience");
    if experience.is_empty() {
        placeholder_block(&mut out, "Section not provided");
    }
    for exp in experience {
        let exp = Some(exp);
        out.push_str("<div class=\"entry\">\n");
        out.push_str(&format!(
            "<strong>{} - {}</strong><br>\n",
            text_or(exp, "company", "Company not provided").html(),
            text_or(exp, "position", "Position not provided").html()
        ));
        out.push_str(&format!(
            "<span>{} - {}</span>\n",
            text_or(exp, "start_date", "Start date not provided").html(),
            text_or(exp, "end_date", "Present").html()
        ));
        let items: Vec<&str> = exp
            .and_then(|e| e.get("responsibilities"))
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        if items.is_empty() {
            placeholder_block(&mut out, "Responsibilities not provided");
        } else {
            out.push_str("<ul>\n");
            for item in items {
                out.push_str(&format!("<li>{}</li>\n", escape_html(item)));
            }
            out.push_str("</ul>\n");
        }
        out.push_str("</div>\n");
    }

    section_header(&mut out, "PROJECT EXPERIENCE");
    let projects = entries(raw, "projects");
    if projects.is_empty() {
        placeholder_block(&mut out, "Section not provided");
    }
    for project in projects {
        let project = Some(project);
        out.push_str("<div class=\"entry\">\n");
        out.push_str(&format!(
            "<strong>{}</strong><br>\n",
            text_or(project, "name", "Project name not provided").html()
        ));
        out.push_str(&format!(
            "<p>{}</p>\n",
            text_or(project, "description", "Description not provided").html()
        ));
        out.push_str(&format!(
            "<p>Technologies: {}</p>\n",
            text_or(project, "technologies", "Technologies not provided").html()
        ));
        out.push_str("</div>\n");
    }

    section_header(&mut out, "EDUCATION");
    let education = entries(raw, "education");
    if education.is_empty() {
        placeholder_block(&mut out, "Section not provided");
    }
    for edu in education {
        let edu = Some(edu);
        out.push_str("<div class=\"entry\">\n");
        out.push_str(&format!(
            "<strong>{} - {}</strong><br>\n",
            text_or(edu, "institution", "Institution not provided").html(),
            text_or(edu, "degree", "Degree not provided").html()
        ));
        out.push_str(&format!(
            "<span>{}</span>\n",
            text_or(edu, "field_of_study", "Field of study not provided").html()
        ));
        out.push_str("</div>\n");
    }

    let awards = entries(raw, "awards");
    if !awards.is_empty() {
        section_header(&mut out, "AWARDS");
        for award in awards {
            let award = Some(award);
            out.push_str(&format!(
                "<div class=\"entry\"><strong>{} - {}</strong></div>\n",
                text_or(award, "title", "Title not provided").html(),
                text_or(award, "organization", "Organization not provided").html()
            ));
        }
    }

    document_close(&mut out);
    out
}
