use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tower_lsp::lsp_types::MessageType;

/// Threshold for `window/logMessage` notifications sent to the client.
/// Server-side tracing output is configured on the command line instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[serde(alias = "warning")]
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Whether a client message of severity `kind` passes this threshold.
    pub fn forwards(
        self,
        kind: MessageType,
    ) -> bool {
        let needed = match kind {
            MessageType::ERROR => LogLevel::Error,
            MessageType::WARNING => LogLevel::Warn,
            MessageType::INFO => LogLevel::Info,
            _ => LogLevel::Debug,
        };
        self >= needed
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggingSettings {
    pub level: LogLevel,
}

impl LoggingSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        if let Some(level) = patch.level {
            self.level = level;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct LoggingSettingsPatch {
    level: Option<LogLevel>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}
