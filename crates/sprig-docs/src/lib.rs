//! Static documentation set and relevance matching.
//!
//! Documents are loaded once at startup from a JSON array of
//! `{title, content}` objects and are read-only for the process lifetime.

mod error;
mod matcher;

pub use error::{DocsError, DocsResult};

use std::path::Path;

use serde::Deserialize;

/// A single documentation entry. No identifier, no versioning.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub title: String,
    pub content: String,
}

/// The full documentation set, in file order.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    docs: Vec<Document>,
}

impl DocumentSet {
    /// Load the set from a JSON file containing an array of documents.
    pub async fn load(path: impl AsRef<Path>) -> DocsResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let docs: Vec<Document> = serde_json::from_str(&raw)?;
        tracing::info!(count = docs.len(), path = %path.display(), "documentation loaded");
        Ok(Self { docs })
    }

    /// Build a set from in-memory documents.
    pub fn from_documents(docs: Vec<Document>) -> Self {
        Self { docs }
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Find the first document relevant to a free-text question.
    ///
    /// Matching is case-insensitive keyword/substring overlap against the
    /// document titles. Returns `None` when nothing matches.
    pub fn find_relevant(&self, question: &str) -> Option<&Document> {
        matcher::find_relevant(question, &self.docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> DocumentSet {
        DocumentSet::from_documents(vec![
            Document {
                title: "Password Reset".into(),
                content: "Use the forgot-password link on the sign-in page.".into(),
            },
            Document {
                title: "Billing".into(),
                content: "Invoices are issued on the first of each month.".into(),
            },
        ])
    }

    #[test]
    fn title_verbatim_in_question_matches_that_document() {
        let docs = sample();
        let doc = docs.find_relevant("How does password reset work?").unwrap();
        assert_eq!(doc.title, "Password Reset");
    }

    #[test]
    fn unrelated_question_matches_nothing() {
        let docs = sample();
        assert!(docs.find_relevant("weather forecast tomorrow").is_none());
    }

    #[tokio::test]
    async fn load_parses_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title": "Shipping", "content": "Orders ship within two days."}}]"#
        )
        .unwrap();

        let docs = DocumentSet::load(file.path()).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs.find_relevant("when does shipping start").is_some());
    }

    #[tokio::test]
    async fn load_missing_file_is_an_error() {
        let err = DocumentSet::load("/nonexistent/docs.json").await.unwrap_err();
        assert!(matches!(err, DocsError::Io(_)));
    }
}
