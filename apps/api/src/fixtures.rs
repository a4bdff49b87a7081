//! Shared test fixtures.

use serde_json::{json, Value};

const SUMMARY_VOCABULARY: &[&str] = &[
    "Backend", "engineer", "with", "deep", "experience", "designing", "reliable",
    "distributed", "systems,", "leading", "small", "teams,", "and", "shipping",
    "customer", "facing", "features", "on", "tight", "schedules.",
];

/// A summary of exactly `words` whitespace-separated tokens.
pub fn summary_of(words: usize) -> String {
    SUMMARY_VOCABULARY
        .iter()
        .cycle()
        .take(words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A résumé that passes every rule, with every optional field populated.
pub fn valid_resume() -> Value {
    json!({
        "header": {
            "name": "Jane Doe",
            "title": "Senior Software Engineer",
            "email": "jane.doe@example.com",
            "phone": "+1 (555) 123-4567",
            "location": "San Francisco, CA"
        },
        "expertise": {
            "summary": summary_of(90)
        },
        "skills": {
            "skills": "Rust, Python, PostgreSQL, Kubernetes, AWS"
        },
        "experience": [
            {
                "company": "Tech Corp",
                "position": "Staff Engineer",
                "start_date": "JAN 2020",
                "end_date": "Present",
                "responsibilities": [
                    "Led development of the billing platform",
                    "Mentored four engineers through promotion",
                    "Cut p99 latency from 800ms to 120ms"
                ]
            }
        ],
        "projects": [
            {
                "name": "Ledger Sync",
                "description": "Event-sourced reconciliation service for card payments",
                "technologies": "Rust, Kafka, PostgreSQL",
                "start_date": "MAR 2021",
                "end_date": "DEC 2021"
            }
        ],
        "education": [
            {
                "institution": "University of California",
                "degree": "Bachelor of Science",
                "field_of_study": "Computer Science",
                "graduation_date": "MAY 2018",
                "gpa": "3.8"
            }
        ],
        "awards": [
            {
                "title": "Engineering Excellence Award",
                "organization": "Tech Corp",
                "date": "NOV 2022",
                "description": "Recognized for the billing platform migration"
            }
        ]
    })
}
