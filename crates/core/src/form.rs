//! Description of the survey form, for clients that render it.
//!
//! Field names match [`crate::survey::SurveyForm`], so a client can post
//! back exactly the keys it was given.

use serde::Serialize;

use crate::options::{FileType, Library, WorkshopSlot};

pub const PAGE_TITLE: &str = "Survey: Your Experience with Python and SQL";
pub const PAGE_ICON: &str = "🎓";
pub const FORM_HEADING: &str = "Let's get to know each other better";
pub const SUBMIT_LABEL: &str = "Submit response";

/// The widget a field is rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text {
        placeholder: &'static str,
        help: &'static str,
        required: bool,
    },
    Number {
        min: i64,
        step: i64,
    },
    MultiSelect {
        options: Vec<&'static str>,
    },
    SingleChoice {
        options: Vec<&'static str>,
        default: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDefinition {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FormField>,
}

fn hours_field(name: &'static str, label: &'static str) -> FormField {
    FormField {
        name,
        label,
        kind: FieldKind::Number { min: 0, step: 1 },
    }
}

/// The survey form, fields in display order.
pub fn survey_form() -> FormDefinition {
    FormDefinition {
        heading: FORM_HEADING,
        submit_label: SUBMIT_LABEL,
        fields: vec![
            FormField {
                name: "name",
                label: "Full name:",
                kind: FieldKind::Text {
                    placeholder: "Enter your name here",
                    help: "This field is required!",
                    required: true,
                },
            },
            hours_field(
                "developer_hours",
                "How would you describe your experience as a developer (active coding hours)?",
            ),
            hours_field(
                "python_hours",
                "How would you describe your experience as a Python developer (active coding hours)?",
            ),
            FormField {
                name: "libraries",
                label: "Which Python libraries/frameworks have you worked with?",
                kind: FieldKind::MultiSelect {
                    options: Library::ALL.iter().map(|l| l.label()).collect(),
                },
            },
            FormField {
                name: "file_types",
                label: "Which file types have you worked with and are familiar with?",
                kind: FieldKind::MultiSelect {
                    options: FileType::ALL.iter().map(|f| f.label()).collect(),
                },
            },
            hours_field(
                "sql_hours",
                "How would you describe your experience as a SQL developer (active coding hours)?",
            ),
            FormField {
                name: "workshop_proposed_time",
                label: "Which of the following time slots would suit you for an introductory Streamlit workshop?",
                kind: FieldKind::SingleChoice {
                    options: WorkshopSlot::ALL.iter().map(|s| s.label()).collect(),
                    default: WorkshopSlot::default().label(),
                },
            },
        ],
    }
}
