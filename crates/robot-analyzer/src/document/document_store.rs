use dashmap::DashMap;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url};

use super::Document;

/// Open editor buffers keyed by URI. Their text is what completion sees;
/// files that are not open are read from disk through the parse cache.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(
        &self,
        uri: Url,
        text: String,
        version: i32,
    ) {
        self.documents.insert(uri.clone(), Document::new(uri, text, version));
    }

    /// Apply incremental or full-content changes and return the new text.
    ///
    /// Returns `None` when the document is not open.
    pub fn apply_changes(
        &self,
        uri: &Url,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Option<String> {
        let mut doc = self.documents.get_mut(uri)?;
        doc.apply_changes(changes, version);
        Some(doc.text.clone())
    }

    /// Take the text a client sent with `didSave`, keeping the version.
    /// Without `text` the buffer is unchanged. Returns the current text, or
    /// `None` when the document is not open.
    pub fn saved(
        &self,
        uri: &Url,
        text: Option<String>,
    ) -> Option<String> {
        let mut doc = self.documents.get_mut(uri)?;
        if let Some(text) = text
            && text != doc.text
        {
            let version = doc.version;
            doc.set_content(text, version);
        }
        Some(doc.text.clone())
    }

    /// Forget a document. Returns `false` if it was not open.
    pub fn close(
        &self,
        uri: &Url,
    ) -> bool {
        self.documents.remove(uri).is_some()
    }

    /// Snapshot of an open document.
    pub fn get(
        &self,
        uri: &Url,
    ) -> Option<Document> {
        self.documents.get(uri).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src/document/document_store_tests.rs"]
mod tests;
