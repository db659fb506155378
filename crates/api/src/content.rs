//! Markdown content shown above the survey form.
//!
//! Files are read on every request. A file that cannot be read becomes an
//! inline error section; it never fails the page.

use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;

/// Files rendered at the top of the page, in order.
pub const PAGE_FILES: [&str; 2] = ["about.md", "workshop_requirements.md"];

/// One content block: either the file's markdown or a message explaining
/// why it is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSection {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn load_section(dir: &Path, file: &str) -> ContentSection {
    match tokio::fs::read_to_string(dir.join(file)).await {
        Ok(markdown) => ContentSection {
            file: file.to_string(),
            markdown: Some(markdown),
            error: None,
        },
        Err(e) => {
            let message = if e.kind() == ErrorKind::NotFound {
                format!("File {file} was not found.")
            } else {
                format!("Error reading file: {e}")
            };
            tracing::warn!(file, error = %e, "Content file unavailable");
            ContentSection {
                file: file.to_string(),
                markdown: None,
                error: Some(message),
            }
        }
    }
}

/// Load every page file from `dir`, in display order.
pub async fn load_page_sections(dir: &Path) -> Vec<ContentSection> {
    let mut sections = Vec::with_capacity(PAGE_FILES.len());
    for file in PAGE_FILES {
        sections.push(load_section(dir, file).await);
    }
    sections
}
