use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// File format of a supervisor document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    Pdf,
    Docx,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "PDF",
            DocumentType::Docx => "DOCX",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Docx => "docx",
        }
    }
}

/// Read-only reference material shared by the supervisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupervisorDocument {
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub uploaded_date: NaiveDate,
    pub url: String,
}

impl SupervisorDocument {
    pub fn new(id: u32, title: impl Into<String>, uploaded_date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            doc_type: DocumentType::Pdf,
            uploaded_date,
            url: "#".to_string(),
        }
    }

    /// Name handed to the file store when the document is downloaded.
    ///
    /// Uses the last url segment, or the title plus extension for placeholder urls.
    pub fn file_name(&self) -> String {
        let segment = self
            .url
            .rsplit('/')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "#");
        match segment {
            Some(s) => s.to_string(),
            None => format!("{}.{}", self.title, self.doc_type.extension()),
        }
    }
}
