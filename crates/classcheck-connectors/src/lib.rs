//! Platform connector boundary
//!
//! Payload types and narrow interfaces for the external productivity
//! systems the hosting application dispatches to: mail delivery, course
//! management, documents, spreadsheets and file storage. The engine core
//! never calls these — it only returns payloads shaped for dispatch, and
//! the caller owns credentials, transport and retry policy.
//!
//! Each capability gets one trait with exactly the operations the workflow
//! needs; concrete implementations (Google Workspace, test doubles, …) live
//! with the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use classcheck_types::error::ConnectorError;

/// An outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Mail delivery.
#[async_trait]
pub trait MailConnector: Send + Sync {
    /// Send one message.
    ///
    /// # Errors
    ///
    /// [`ConnectorError::Service`] when delivery fails; surfaced with
    /// context, never retried here.
    async fn send(&self, message: &MailMessage) -> Result<(), ConnectorError>;
}

/// A course-stream announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementRequest {
    /// Course identifier in the course-management system.
    pub course_id: String,
    /// Announcement text.
    pub text: String,
}

/// A coursework assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseworkRequest {
    /// Course identifier.
    pub course_id: String,
    /// Assignment title.
    pub title: String,
    /// Assignment description (typically generated content).
    pub description: String,
    /// Attached material references (links or file ids).
    #[serde(default)]
    pub materials: Vec<String>,
}

/// Course management (announcements and assignments).
#[async_trait]
pub trait CourseConnector: Send + Sync {
    /// Post an announcement to the course stream.
    async fn create_announcement(&self, request: &AnnouncementRequest)
    -> Result<(), ConnectorError>;

    /// Create a coursework assignment.
    async fn create_coursework(&self, request: &CourseworkRequest) -> Result<(), ConnectorError>;
}

/// One document operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum DocumentOp {
    /// Create a new empty document.
    Create { title: String },
    /// Copy an existing document (e.g. from a template).
    Copy { source_id: String, title: String },
    /// Insert text at the start of the document body.
    InsertText { document_id: String, text: String },
    /// Replace every occurrence of a placeholder.
    ReplaceText {
        document_id: String,
        placeholder: String,
        replacement: String,
    },
}

/// Document creation and editing.
#[async_trait]
pub trait DocumentConnector: Send + Sync {
    /// Apply one operation, returning the id of the affected document.
    async fn apply(&self, op: &DocumentOp) -> Result<String, ConnectorError>;
}

/// A spreadsheet range reference (e.g. `"Feuille1!A1:B10"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRange {
    /// Spreadsheet identifier.
    pub spreadsheet_id: String,
    /// A1-notation range.
    pub range: String,
}

/// Spreadsheet read/write.
#[async_trait]
pub trait SheetConnector: Send + Sync {
    /// Read the values in a range, row-major.
    async fn read(&self, range: &SheetRange) -> Result<Vec<Vec<String>>, ConnectorError>;

    /// Write values into a range, row-major.
    async fn write(
        &self,
        range: &SheetRange,
        values: &[Vec<String>],
    ) -> Result<(), ConnectorError>;
}

/// File storage.
#[async_trait]
pub trait FileConnector: Send + Sync {
    /// Read a file's content.
    async fn read(&self, path: &str) -> Result<String, ConnectorError>;

    /// Write (create or overwrite) a file.
    async fn write(&self, path: &str, content: &str) -> Result<(), ConnectorError>;

    /// Append to a file, creating it if absent.
    async fn append(&self, path: &str, content: &str) -> Result<(), ConnectorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_ops_serialize_with_an_op_tag() {
        let op = DocumentOp::ReplaceText {
            document_id: "doc-42".to_string(),
            placeholder: "{{competence}}".to_string(),
            replacement: "D1.3".to_string(),
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "replace-text");
        assert_eq!(json["document_id"], "doc-42");
    }

    #[test]
    fn coursework_materials_default_to_empty() {
        let request: CourseworkRequest = serde_json::from_str(
            r#"{"course_id": "c-1", "title": "Devoir", "description": "Validation D1.3"}"#,
        )
        .unwrap();
        assert!(request.materials.is_empty());
    }

    // Compile-time check that the traits stay object-safe: the engine's
    // callers hold connectors as trait objects.
    #[allow(dead_code)]
    fn assert_object_safe(
        _mail: &dyn MailConnector,
        _course: &dyn CourseConnector,
        _documents: &dyn DocumentConnector,
        _sheets: &dyn SheetConnector,
        _files: &dyn FileConnector,
    ) {
    }

    /// In-memory file connector standing in for real storage.
    #[derive(Default)]
    struct MemoryFiles {
        entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
    }

    #[async_trait]
    impl FileConnector for MemoryFiles {
        async fn read(&self, path: &str) -> Result<String, ConnectorError> {
            self.entries
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| ConnectorError::service("file", format!("no such file: {path}")))
        }

        async fn write(&self, path: &str, content: &str) -> Result<(), ConnectorError> {
            self.entries
                .lock()
                .unwrap()
                .insert(path.to_string(), content.to_string());
            Ok(())
        }

        async fn append(&self, path: &str, content: &str) -> Result<(), ConnectorError> {
            self.entries
                .lock()
                .unwrap()
                .entry(path.to_string())
                .or_default()
                .push_str(content);
            Ok(())
        }
    }

    #[tokio::test]
    async fn file_connector_contract_round_trips() {
        let files: Box<dyn FileConnector> = Box::new(MemoryFiles::default());

        files.write("suivi/D1.3.md", "# Suivi\n").await.unwrap();
        files.append("suivi/D1.3.md", "9/10 maîtrisé\n").await.unwrap();
        assert_eq!(
            files.read("suivi/D1.3.md").await.unwrap(),
            "# Suivi\n9/10 maîtrisé\n"
        );

        let err = files.read("absent.md").await.unwrap_err();
        assert!(matches!(err, ConnectorError::Service { ref connector, .. } if connector == "file"));
    }
}
