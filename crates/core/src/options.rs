//! Fixed option lists offered by the survey form.
//!
//! The labels are stored verbatim in `survey_responses`, so changing one
//! splits the tally for existing rows.

use serde::Serialize;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Libraries
-------------------------------------------------------------------------- */

/// A Python library or framework the respondent has worked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Library {
    #[serde(rename = "NumPy")]
    NumPy,
    #[serde(rename = "Pandas")]
    Pandas,
    #[serde(rename = "Matplotlib")]
    Matplotlib,
    #[serde(rename = "Seaborn")]
    Seaborn,
    #[serde(rename = "Flask")]
    Flask,
    #[serde(rename = "Django")]
    Django,
    #[serde(rename = "Streamlit")]
    Streamlit,
    #[serde(rename = "Other library")]
    Other,
    #[serde(rename = "None")]
    NoLibrary,
}

impl Library {
    /// Every option, in the order the form presents them.
    pub const ALL: [Library; 9] = [
        Library::NumPy,
        Library::Pandas,
        Library::Matplotlib,
        Library::Seaborn,
        Library::Flask,
        Library::Django,
        Library::Streamlit,
        Library::Other,
        Library::NoLibrary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Library::NumPy => "NumPy",
            Library::Pandas => "Pandas",
            Library::Matplotlib => "Matplotlib",
            Library::Seaborn => "Seaborn",
            Library::Flask => "Flask",
            Library::Django => "Django",
            Library::Streamlit => "Streamlit",
            Library::Other => "Other library",
            Library::NoLibrary => "None",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|lib| lib.label() == label)
            .ok_or_else(|| unknown_option("library", label, Self::ALL.map(Self::label)))
    }
}

/* --------------------------------------------------------------------------
File types
-------------------------------------------------------------------------- */

/// A file format the respondent is familiar with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileType {
    #[serde(rename = ".csv")]
    Csv,
    #[serde(rename = ".json")]
    Json,
    #[serde(rename = ".xlsx")]
    Xlsx,
    #[serde(rename = ".sql")]
    Sql,
    #[serde(rename = ".txt")]
    Txt,
    #[serde(rename = ".xml")]
    Xml,
    #[serde(rename = "Other type")]
    Other,
}

impl FileType {
    pub const ALL: [FileType; 7] = [
        FileType::Csv,
        FileType::Json,
        FileType::Xlsx,
        FileType::Sql,
        FileType::Txt,
        FileType::Xml,
        FileType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FileType::Csv => ".csv",
            FileType::Json => ".json",
            FileType::Xlsx => ".xlsx",
            FileType::Sql => ".sql",
            FileType::Txt => ".txt",
            FileType::Xml => ".xml",
            FileType::Other => "Other type",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|ft| ft.label() == label)
            .ok_or_else(|| unknown_option("file type", label, Self::ALL.map(Self::label)))
    }
}

/* --------------------------------------------------------------------------
Workshop slots
-------------------------------------------------------------------------- */

/// The time slot the respondent votes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum WorkshopSlot {
    #[default]
    #[serde(rename = "Friday 09:00-12:00")]
    FridayMorning,
    #[serde(rename = "Friday 13:00-16:00")]
    FridayAfternoon,
    #[serde(rename = "Not available this Friday anymore")]
    NotAvailable,
}

impl WorkshopSlot {
    pub const ALL: [WorkshopSlot; 3] = [
        WorkshopSlot::FridayMorning,
        WorkshopSlot::FridayAfternoon,
        WorkshopSlot::NotAvailable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkshopSlot::FridayMorning => "Friday 09:00-12:00",
            WorkshopSlot::FridayAfternoon => "Friday 13:00-16:00",
            WorkshopSlot::NotAvailable => "Not available this Friday anymore",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.label() == label)
            .ok_or_else(|| {
                unknown_option("workshop time slot", label, Self::ALL.map(Self::label))
            })
    }
}

fn unknown_option<const N: usize>(kind: &str, label: &str, valid: [&str; N]) -> CoreError {
    CoreError::Validation(format!(
        "Unknown {kind}: '{label}'. Valid options: {}",
        valid.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn labels_round_trip_through_from_label() {
        for lib in Library::ALL {
            assert_eq!(Library::from_label(lib.label()).unwrap(), lib);
        }
        for ft in FileType::ALL {
            assert_eq!(FileType::from_label(ft.label()).unwrap(), ft);
        }
        for slot in WorkshopSlot::ALL {
            assert_eq!(WorkshopSlot::from_label(slot.label()).unwrap(), slot);
        }
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_matches!(Library::from_label("pandas"), Err(CoreError::Validation(_)));
        assert_matches!(FileType::from_label(".CSV"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn unknown_slot_lists_valid_options() {
        let err = WorkshopSlot::from_label("Saturday").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Saturday"));
        assert!(msg.contains("Friday 13:00-16:00"));
    }

    #[test]
    fn default_slot_is_first_option() {
        assert_eq!(WorkshopSlot::default(), WorkshopSlot::ALL[0]);
    }

    #[test]
    fn serde_label_matches_label() {
        let json = serde_json::to_value(Library::Other).unwrap();
        assert_eq!(json, Library::Other.label());
        let json = serde_json::to_value(WorkshopSlot::NotAvailable).unwrap();
        assert_eq!(json, WorkshopSlot::NotAvailable.label());
    }
}
