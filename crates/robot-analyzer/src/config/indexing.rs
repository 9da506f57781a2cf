use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;

pub const MIN_MAX_FILE_SIZE_KB: u64 = 16;
pub const MAX_MAX_FILE_SIZE_KB: u64 = 1024 * 64;

const DEFAULT_EXTENSIONS: [&str; 3] = ["robot", "resource", "txt"];

#[derive(Debug, Clone, PartialEq)]
pub struct IndexingSettings {
    pub enable: bool,
    pub max_file_size_kb: u64,
    pub exclude_paths: Vec<String>,
    /// File extensions picked up by workspace indexing, lowercase, no dot.
    pub extensions: Vec<String>,
}

impl Default for IndexingSettings {
    fn default() -> Self {
        Self {
            enable: true,
            max_file_size_kb: 512,
            exclude_paths: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl IndexingSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: IndexingSettingsPatch,
    ) {
        if let Some(v) = patch.enable {
            self.enable = v;
        }
        if let Some(v) = patch.max_file_size_kb {
            self.max_file_size_kb = v;
        }
        if let Some(v) = patch.exclude_paths {
            self.exclude_paths = v;
        }
        if let Some(v) = patch.extensions {
            self.extensions = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.max_file_size_kb = self.max_file_size_kb.clamp(MIN_MAX_FILE_SIZE_KB, MAX_MAX_FILE_SIZE_KB);
        let mut seen = HashSet::new();
        self.exclude_paths = self
            .exclude_paths
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect();
        let mut seen = HashSet::new();
        self.extensions = self
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .filter(|ext| seen.insert(ext.clone()))
            .collect();
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb.saturating_mul(1024)
    }

    pub fn is_indexed_extension(
        &self,
        extension: &str,
    ) -> bool {
        self.extensions.iter().any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct IndexingSettingsPatch {
    pub(crate) enable: Option<bool>,
    pub(crate) max_file_size_kb: Option<u64>,
    pub(crate) exclude_paths: Option<Vec<String>>,
    pub(crate) extensions: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
