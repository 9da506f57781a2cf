use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// How a typed keyword cell is compared against keyword names. Both modes
/// ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Prefix,
    Substring,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub enable: bool,
    pub match_mode: MatchMode,
    /// Offer `BuiltIn` keywords without an explicit `Library` import.
    pub implicit_builtin: bool,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            enable: true,
            match_mode: MatchMode::Prefix,
            implicit_builtin: true,
        }
    }
}

impl CompletionSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: CompletionSettingsPatch,
    ) {
        if let Some(v) = patch.enable {
            self.enable = v;
        }
        if let Some(v) = patch.match_mode {
            self.match_mode = v;
        }
        if let Some(v) = patch.implicit_builtin {
            self.implicit_builtin = v;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CompletionSettingsPatch {
    pub(crate) enable: Option<bool>,
    pub(crate) match_mode: Option<MatchMode>,
    #[serde(rename = "implicitBuiltIn", alias = "implicitBuiltin")]
    pub(crate) implicit_builtin: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
