use std::ops::Range;

use crate::project::KeywordDefinition;

/// One completion candidate. Offsets are absolute byte offsets into the
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub matched_name: String,
    pub replace_start: usize,
    pub replace_end: usize,
    pub insert_text: String,
    pub display_label: String,
    /// Where the keyword comes from: a file name or a library name.
    pub detail: String,
}

impl Proposal {
    pub fn from_definition(
        definition: &KeywordDefinition,
        replace: Range<usize>,
    ) -> Self {
        Self {
            matched_name: definition.name.clone(),
            replace_start: replace.start,
            replace_end: replace.end,
            insert_text: definition.name.clone(),
            display_label: definition.name.clone(),
            detail: definition.origin.to_string(),
        }
    }

    pub fn replace_range(&self) -> Range<usize> {
        self.replace_start..self.replace_end
    }
}
