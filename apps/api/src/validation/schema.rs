//! Declarative résumé schema: which keys exist at every level, how each value
//! is coerced, and which rules are attached to it.
//!
//! The walker in `validator.rs` evaluates these tables uniformly; adding a
//! rule to a field is a one-line change here.

use crate::validation::rules::{
    ListRule, Rule, MIN_RESPONSIBILITIES, SUMMARY_MAX_WORDS, SUMMARY_MIN_WORDS,
};

// ────────────────────────────────────────────────────────────────────────────
// Schema types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A single string; `rules` apply to it.
    Text,
    /// A list of strings. `item_rules` apply to each element at its own
    /// indexed path, `list_rules` to the list as a whole.
    TextList {
        item_rules: &'static [Rule],
        list_rules: &'static [ListRule],
    },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Optional fields accept an absent key or `null`.
    pub required: bool,
    pub kind: FieldKind,
    pub rules: &'static [Rule],
}

#[derive(Debug, Clone, Copy)]
pub struct RecordSpec {
    pub fields: &'static [FieldSpec],
}

impl RecordSpec {
    pub fn declares(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.name == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one object.
    One,
    /// A required, non-empty list of objects.
    OneOrMore,
    /// An optional list of objects; absent or `null` means empty.
    ZeroOrMore,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub key: &'static str,
    pub cardinality: Cardinality,
    pub record: &'static RecordSpec,
}

const fn text(name: &'static str, rules: &'static [Rule]) -> FieldSpec {
    FieldSpec {
        name,
        required: true,
        kind: FieldKind::Text,
        rules,
    }
}

const fn optional_text(name: &'static str, rules: &'static [Rule]) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
        kind: FieldKind::Text,
        rules,
    }
}

const START_DATE: Rule = Rule::MonthYear {
    allow_present: false,
};
const END_DATE: Rule = Rule::MonthYear {
    allow_present: true,
};

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

pub static HEADER: RecordSpec = RecordSpec {
    fields: &[
        text("name", &[Rule::MinLength(1), Rule::MaxLength(100), Rule::NoEmoji]),
        text("title", &[Rule::MinLength(1), Rule::MaxLength(150), Rule::NoEmoji]),
        text("email", &[Rule::Email]),
        text("phone", &[Rule::Phone]),
        text("location", &[Rule::MinLength(1), Rule::MaxLength(100), Rule::NoEmoji]),
    ],
};

pub static EXPERTISE: RecordSpec = RecordSpec {
    fields: &[text(
        "summary",
        &[
            Rule::MinLength(1),
            Rule::WordCount {
                min: SUMMARY_MIN_WORDS,
                max: SUMMARY_MAX_WORDS,
            },
            Rule::NoEmoji,
        ],
    )],
};

pub static SKILLS: RecordSpec = RecordSpec {
    fields: &[text(
        "skills",
        &[Rule::MinLength(1), Rule::CommaSeparated, Rule::NoEmojiTokens],
    )],
};

pub static EXPERIENCE: RecordSpec = RecordSpec {
    fields: &[
        text("company", &[Rule::MinLength(1), Rule::MaxLength(100), Rule::NoEmoji]),
        text("position", &[Rule::MinLength(1), Rule::MaxLength(100), Rule::NoEmoji]),
        text("start_date", &[START_DATE]),
        optional_text("end_date", &[END_DATE]),
        FieldSpec {
            name: "responsibilities",
            required: true,
            kind: FieldKind::TextList {
                item_rules: &[Rule::NoEmoji],
                list_rules: &[
                    ListRule::MinItems {
                        min: MIN_RESPONSIBILITIES,
                        noun: "responsibilities",
                    },
                    ListRule::NoBlankItems {
                        noun: "responsibilities",
                    },
                ],
            },
            rules: &[],
        },
    ],
};

pub static PROJECT: RecordSpec = RecordSpec {
    fields: &[
        text("name", &[Rule::MinLength(1), Rule::MaxLength(100), Rule::NoEmoji]),
        text(
            "description",
            &[Rule::MinLength(1), Rule::MaxLength(500), Rule::NoEmoji],
        ),
        text("technologies", &[Rule::MinLength(1), Rule::NoEmoji]),
        text("start_date", &[START_DATE]),
        optional_text("end_date", &[END_DATE]),
    ],
};

pub static EDUCATION: RecordSpec = RecordSpec {
    fields: &[
        text(
            "institution",
            &[Rule::MinLength(1), Rule::MaxLength(100), Rule::NoEmoji],
        ),
        text("degree", &[Rule::MinLength(1), Rule::MaxLength(100), Rule::NoEmoji]),
        text(
            "field_of_study",
            &[Rule::MinLength(1), Rule::MaxLength(100), Rule::NoEmoji],
        ),
        text("graduation_date", &[START_DATE]),
        optional_text("gpa", &[Rule::MaxLength(10), Rule::NoEmoji]),
    ],
};

pub static AWARD: RecordSpec = RecordSpec {
    fields: &[
        text("title", &[Rule::MinLength(1), Rule::MaxLength(100), Rule::NoEmoji]),
        text(
            "organization",
            &[Rule::MinLength(1), Rule::MaxLength(100), Rule::NoEmoji],
        ),
        text("date", &[START_DATE]),
        optional_text("description", &[Rule::MaxLength(200), Rule::NoEmoji]),
    ],
};

// ────────────────────────────────────────────────────────────────────────────
// Aggregate
// ────────────────────────────────────────────────────────────────────────────

/// Top-level sections in evaluation (and rendering) order.
pub static RESUME_SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        key: "header",
        cardinality: Cardinality::One,
        record: &HEADER,
    },
    SectionSpec {
        key: "expertise",
        cardinality: Cardinality::One,
        record: &EXPERTISE,
    },
    SectionSpec {
        key: "skills",
        cardinality: Cardinality::One,
        record: &SKILLS,
    },
    SectionSpec {
        key: "experience",
        cardinality: Cardinality::OneOrMore,
        record: &EXPERIENCE,
    },
    SectionSpec {
        key: "projects",
        cardinality: Cardinality::OneOrMore,
        record: &PROJECT,
    },
    SectionSpec {
        key: "education",
        cardinality: Cardinality::OneOrMore,
        record: &EDUCATION,
    },
    SectionSpec {
        key: "awards",
        cardinality: Cardinality::ZeroOrMore,
        record: &AWARD,
    },
];

pub fn declares_section(key: &str) -> bool {
    RESUME_SECTIONS.iter().any(|s| s.key == key)
}
