use std::{
    fmt::{self, Display, Formatter},
    ops::Range,
};

use tracing::debug;

use super::{
    position::resolve_keyword_region,
    proposal::Proposal,
};
use crate::{
    config::MatchMode,
    document::DocumentView,
    project::{KeywordMatcher, KeywordWalker},
    syntax::ParsedFile,
    vfs::FileId,
};

/// A search pass of the engine, from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStage {
    /// Filter by the whole keyword cell.
    FullInput,
    /// Filter by the part of the keyword cell left of the cursor.
    TypedSoFar,
    /// No filter.
    ShowAll,
}

/// Proposals plus the stages that were run to produce them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub proposals: Vec<Proposal>,
    pub stages: Vec<CompletionStage>,
}

impl CompletionOutcome {
    pub fn final_stage(&self) -> Option<CompletionStage> {
        self.stages.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    OffsetOutOfRange {
        offset: usize,
    },
    UnknownDocument(FileId),
    /// The parsed lines do not describe the line under the cursor, e.g. a
    /// snapshot older than the buffer.
    MissingLine {
        line: usize,
    },
}

impl Display for CompletionError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::OffsetOutOfRange {
                offset,
            } => write!(f, "offset {offset} is outside the document"),
            Self::UnknownDocument(file) => write!(f, "{file} is not open"),
            Self::MissingLine {
                line,
            } => write!(f, "no parsed line {line}"),
        }
    }
}

impl std::error::Error for CompletionError {}

/// Keyword-name completion over the walker's visible definitions.
pub struct CompletionEngine<'a> {
    walker: KeywordWalker<'a>,
    match_mode: MatchMode,
}

impl<'a> CompletionEngine<'a> {
    pub fn new(
        walker: KeywordWalker<'a>,
        match_mode: MatchMode,
    ) -> Self {
        Self {
            walker,
            match_mode,
        }
    }

    /// Proposals for the keyword under `offset` in `file`.
    ///
    /// `view` is the buffer being edited and `parsed` its parse. A cursor
    /// outside a keyword column gives an empty outcome, not an error.
    pub fn complete<D: DocumentView + ?Sized>(
        &self,
        file: &FileId,
        view: &D,
        parsed: &ParsedFile,
        offset: usize,
    ) -> Result<CompletionOutcome, CompletionError> {
        let line_index = view.line_of_offset(offset).ok_or(CompletionError::OffsetOutOfRange {
            offset,
        })?;
        let missing = CompletionError::MissingLine {
            line: line_index,
        };
        let line_start = view.line_start(line_index).ok_or_else(|| missing.clone())?;
        let text = view.line_slice(line_index).ok_or_else(|| missing.clone())?;
        let line = parsed
            .line(line_index)
            .filter(|line| line.start() == line_start && line.len() == text.len())
            .ok_or(missing)?;

        let cursor = offset.saturating_sub(line_start);
        let Some(region) = resolve_keyword_region(text, line) else {
            debug!("[completion] line {line_index} ({:?}) holds no keyword call", line.kind());
            return Ok(CompletionOutcome::default());
        };
        if !region.contains(cursor) {
            debug!("[completion] cursor {cursor} outside keyword column {}..={}", region.left, region.right);
            return Ok(CompletionOutcome::default());
        }

        let replace = region.to_absolute(line_start);
        let mut outcome = CompletionOutcome::default();

        let Some(keyword) = line.cell(1) else {
            outcome.stages.push(CompletionStage::FullInput);
            outcome.proposals = self.search(file, &KeywordMatcher::All, &replace);
            return Ok(outcome);
        };

        let full = keyword.value();
        outcome.stages.push(CompletionStage::FullInput);
        outcome.proposals = self.search(file, &KeywordMatcher::new(self.match_mode, full), &replace);
        if !needs_relaxation(&outcome.proposals, full) {
            return Ok(outcome);
        }

        outcome.proposals.clear();
        if region.is_strictly_inside(cursor) {
            let typed = typed_prefix(full, cursor.saturating_sub(keyword.start().saturating_sub(line_start)));
            outcome.stages.push(CompletionStage::TypedSoFar);
            outcome.proposals = self.search(file, &KeywordMatcher::new(self.match_mode, typed), &replace);
        }
        if needs_relaxation(&outcome.proposals, full) {
            outcome.stages.push(CompletionStage::ShowAll);
            outcome.proposals = self.search(file, &KeywordMatcher::All, &replace);
        }

        debug!(
            "[completion] {} proposal(s) for '{full}' after {:?}",
            outcome.proposals.len(),
            outcome.final_stage()
        );
        Ok(outcome)
    }

    fn search(
        &self,
        file: &FileId,
        matcher: &KeywordMatcher,
        replace: &Range<usize>,
    ) -> Vec<Proposal> {
        self.walker
            .definitions(file.clone(), matcher)
            .map(|definition| Proposal::from_definition(&definition, replace.clone()))
            .collect()
    }
}

/// Nothing found, or only the keyword that is already written out in full.
fn needs_relaxation(
    proposals: &[Proposal],
    full: &str,
) -> bool {
    match proposals {
        [] => true,
        [only] => only.matched_name == full,
        _ => false,
    }
}

/// The first `len` bytes of `value`, clamped to its length and backed off to
/// a char boundary.
fn typed_prefix(
    value: &str,
    len: usize,
) -> &str {
    let mut end = len.min(value.len());
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[cfg(test)]
#[path = "../../tests/src/completion/engine_tests.rs"]
mod tests;
