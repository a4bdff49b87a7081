use serde::{Deserialize, Deserializer, Serialize};

/// A résumé that satisfied every validation rule.
///
/// Only `validation::validate` should construct one from untrusted input;
/// renderers take it as proof that the data is well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resume {
    pub header: Header,
    pub expertise: Expertise,
    pub skills: Skills,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub awards: Vec<Award>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Header {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expertise {
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skills {
    /// Comma-delimited, kept verbatim.
    pub skills: String,
}

impl Skills {
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        crate::validation::rules::skill_tokens(&self.skills)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    /// `MMM YYYY` or `Present`; `None` renders as `Present`.
    #[serde(default)]
    pub end_date: Option<String>,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub graduation_date: String,
    #[serde(default)]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Award {
    pub title: String,
    pub organization: String,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Shared by `Experience` and `Project`.
pub fn display_end_date(end_date: Option<&str>) -> &str {
    end_date.unwrap_or(crate::validation::rules::PRESENT)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
