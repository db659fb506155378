//! Survey submissions: form input, name validation and the validated record.
//!
//! [`SurveyForm`] is what a client posts. [`SurveyForm::into_response`]
//! checks the name first, then the numeric floors, then the option lists,
//! and only then builds the [`SurveyResponse`] that gets persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_general_category::{get_general_category, GeneralCategory};
use validator::Validate;

use crate::error::CoreError;
use crate::options::{FileType, Library, WorkshopSlot};

/// Minimum name length, in characters.
pub const MIN_NAME_LEN: usize = 3;

/// Maximum name length, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Separator used when a multi-select is stored as a single text column.
pub const SELECTION_SEPARATOR: &str = ", ";

/* --------------------------------------------------------------------------
Name validation
-------------------------------------------------------------------------- */

/// How prominently a validation failure should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Why a respondent's name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("Please enter your name to continue.")]
    Missing,

    #[error("The name must have at least 3 characters.")]
    TooShort,

    #[error("The name cannot exceed 50 characters.")]
    TooLong,

    #[error("The name must contain only letters and spaces.")]
    InvalidCharacters,
}

impl NameError {
    /// A missing name is a prompt, not a mistake.
    pub fn severity(&self) -> Severity {
        match self {
            NameError::Missing => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Check a name against the survey's format rules.
///
/// Rules are applied in order and the first failure wins:
///
/// 1. non-empty
/// 2. at least [`MIN_NAME_LEN`] characters
/// 3. at most [`MAX_NAME_LEN`] characters
/// 4. only letters once spaces are removed
///
/// Lengths count characters, not bytes, so "Ștefan" is six long. A letter
/// is any character in a Unicode `L*` general category; letter-like
/// numerals and symbols such as `Ⅻ` or `Ⓐ` do not count.
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Missing);
    }

    let len = name.chars().count();
    if len < MIN_NAME_LEN {
        return Err(NameError::TooShort);
    }
    if len > MAX_NAME_LEN {
        return Err(NameError::TooLong);
    }

    let mut letters = name.chars().filter(|c| *c != ' ').peekable();
    if letters.peek().is_none() || !letters.all(is_letter) {
        return Err(NameError::InvalidCharacters);
    }

    Ok(())
}

fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/* --------------------------------------------------------------------------
Form input
-------------------------------------------------------------------------- */

/// Raw form state as submitted by a client.
///
/// Every field has a default matching the widget's initial state, so a
/// partially filled form still deserializes and gets a precise error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SurveyForm {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    #[validate(range(min = 0, max = 2147483647, message = "Developer hours must be between 0 and 2147483647"))]
    pub developer_hours: i64,

    #[serde(default)]
    #[validate(range(min = 0, max = 2147483647, message = "Python hours must be between 0 and 2147483647"))]
    pub python_hours: i64,

    #[serde(default)]
    pub libraries: Vec<String>,

    #[serde(default)]
    pub file_types: Vec<String>,

    #[serde(default)]
    #[validate(range(min = 0, max = 2147483647, message = "SQL hours must be between 0 and 2147483647"))]
    pub sql_hours: i64,

    /// Omitted means the first slot, which the radio widget preselects.
    #[serde(default)]
    pub workshop_proposed_time: Option<String>,
}

/// Why a form could not be turned into a [`SurveyResponse`].
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl SurveyForm {
    /// Read a form from a posted JSON body.
    ///
    /// The name rules run on the raw `name` value before the rest of the
    /// body is deserialized, so a mistyped hours field never hides a name
    /// error. An absent or `null` name counts as empty.
    pub fn from_json(body: Value) -> Result<Self, FormError> {
        let Value::Object(fields) = &body else {
            return Err(CoreError::Validation("Expected a JSON object".to_string()).into());
        };

        match fields.get("name") {
            None | Some(Value::Null) => validate_name("")?,
            Some(Value::String(name)) => validate_name(name)?,
            Some(other) => {
                return Err(CoreError::Validation(format!(
                    "name: expected a string, got {other}"
                ))
                .into())
            }
        }

        serde_json::from_value(body)
            .map_err(|e| CoreError::Validation(format!("Invalid form input: {e}")).into())
    }

    /// Validate the form and build the record to persist.
    pub fn into_response(self) -> Result<SurveyResponse, FormError> {
        validate_name(&self.name)?;

        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let libraries = self
            .libraries
            .iter()
            .map(|label| Library::from_label(label))
            .collect::<Result<Vec<_>, _>>()?;
        let file_types = self
            .file_types
            .iter()
            .map(|label| FileType::from_label(label))
            .collect::<Result<Vec<_>, _>>()?;
        let workshop_proposed_time = match self.workshop_proposed_time.as_deref() {
            Some(label) => WorkshopSlot::from_label(label)?,
            None => WorkshopSlot::default(),
        };

        Ok(SurveyResponse {
            name: self.name,
            developer_hours: to_hours(self.developer_hours)?,
            python_hours: to_hours(self.python_hours)?,
            libraries: join_selection(libraries.iter().map(|l| l.label())),
            file_types: join_selection(file_types.iter().map(|f| f.label())),
            sql_hours: to_hours(self.sql_hours)?,
            workshop_proposed_time,
        })
    }
}

fn to_hours(value: i64) -> Result<i32, CoreError> {
    i32::try_from(value)
        .map_err(|_| CoreError::Validation(format!("Hours value out of range: {value}")))
}

/// Join multi-select labels into one column value.
///
/// Repeated labels are dropped, keeping the first occurrence.
pub fn join_selection<'a>(labels: impl IntoIterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for label in labels {
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    seen.join(SELECTION_SEPARATOR)
}

/* --------------------------------------------------------------------------
Validated record
-------------------------------------------------------------------------- */

/// One validated submission, shaped exactly like a `survey_responses` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyResponse {
    pub name: String,
    pub developer_hours: i32,
    pub python_hours: i32,
    pub libraries: String,
    pub file_types: String,
    pub sql_hours: i32,
    pub workshop_proposed_time: WorkshopSlot,
}
