//! Declarative configuration system inspired by rust-analyzer.
//!
//! Settings are split into one file per category. [`ServerSettings`]
//! aggregates all categories and handles JSON deserialization from LSP
//! initialization options and `didChangeConfiguration` payloads.

pub(crate) mod completion;
pub(crate) mod indexing;
pub(crate) mod logging;

use std::collections::HashMap;

use completion::CompletionSettingsPatch;
pub use completion::{CompletionSettings, MatchMode};
use indexing::IndexingSettingsPatch;
pub use indexing::{IndexingSettings, MAX_MAX_FILE_SIZE_KB, MIN_MAX_FILE_SIZE_KB};
use logging::LoggingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use serde::Deserialize;
use serde_json::Value;

pub const SETTINGS_SECTION_KEY: &str = "robot-analyzer";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerSettings {
    pub completion: CompletionSettings,
    pub indexing: IndexingSettings,
    pub logging: LoggingSettings,
}

impl ServerSettings {
    pub fn from_lsp_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<ServerSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(p) = patch.completion {
            self.completion.apply_patch(p);
        }
        if let Some(p) = patch.indexing {
            self.indexing.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.indexing.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    completion: Option<CompletionSettingsPatch>,
    indexing: Option<IndexingSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());
    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }
    candidates
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
