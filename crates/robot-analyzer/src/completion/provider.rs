use std::{path::PathBuf, sync::Arc};

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, CompletionTextEdit, Position, Range, TextEdit, Url};
use tracing::debug;

use crate::{
    completion::{
        engine::{CompletionEngine, CompletionError, CompletionOutcome},
        proposal::Proposal,
    },
    config::CompletionSettings,
    document::Document,
    project::KeywordWalker,
    syntax::{ParseCache, ParsedFile},
    text_pos::position_at,
    vfs::FileId,
};

/// Turns engine proposals into LSP completion items for open documents.
pub struct CompletionProvider {
    parse_cache: Arc<ParseCache>,
}

impl CompletionProvider {
    pub fn new(parse_cache: Arc<ParseCache>) -> Self {
        Self {
            parse_cache,
        }
    }

    /// Build a completion list for the given document and cursor position.
    ///
    /// Engine errors are logged and answered with an empty list.
    pub fn provide(
        &self,
        uri: &Url,
        document: Option<&Document>,
        position: Position,
        settings: &CompletionSettings,
        search_roots: &[PathBuf],
    ) -> Vec<CompletionItem> {
        if !settings.enable {
            return Vec::new();
        }
        let Some(document) = document else {
            debug!("[completion] {}", CompletionError::UnknownDocument(FileId::from_url(uri)));
            return Vec::new();
        };

        match self.complete(document, position, settings, search_roots) {
            Ok(outcome) => outcome
                .proposals
                .iter()
                .enumerate()
                .filter_map(|(index, proposal)| completion_item(document, index, proposal))
                .collect(),
            Err(error) => {
                debug!("[completion] {error}");
                Vec::new()
            },
        }
    }

    /// Run the staged search for an open document.
    pub fn complete(
        &self,
        document: &Document,
        position: Position,
        settings: &CompletionSettings,
        search_roots: &[PathBuf],
    ) -> Result<CompletionOutcome, CompletionError> {
        let file = FileId::from_url(&document.uri);
        let offset = document.offset_of(position).ok_or(CompletionError::MissingLine {
            line: position.line as usize,
        })?;
        let parsed = self.snapshot(&file, &document.text);

        let walker =
            KeywordWalker::new(&self.parse_cache, search_roots).with_implicit_builtin(settings.implicit_builtin);
        CompletionEngine::new(walker, settings.match_mode).complete(&file, document, &parsed, offset)
    }

    /// Cached parse of `text`, reparsed when the cache holds other content.
    fn snapshot(
        &self,
        file: &FileId,
        text: &str,
    ) -> Arc<ParsedFile> {
        match self.parse_cache.get(file) {
            Some(parsed) if parsed.source() == text => parsed,
            _ => self.parse_cache.update(file.clone(), text),
        }
    }
}

fn completion_item(
    document: &Document,
    index: usize,
    proposal: &Proposal,
) -> Option<CompletionItem> {
    let range = Range {
        start: position_at(document, proposal.replace_start)?,
        end: position_at(document, proposal.replace_end)?,
    };
    Some(CompletionItem {
        label: proposal.display_label.clone(),
        kind: Some(CompletionItemKind::FUNCTION),
        detail: Some(proposal.detail.clone()),
        // Keeps the client from re-sorting the walker's visitation order.
        sort_text: Some(format!("{index:04}")),
        filter_text: Some(proposal.matched_name.clone()),
        text_edit: Some(CompletionTextEdit::Edit(TextEdit {
            range,
            new_text: proposal.insert_text.clone(),
        })),
        ..Default::default()
    })
}

#[cfg(test)]
#[path = "../../tests/src/completion/provider_tests.rs"]
mod tests;
