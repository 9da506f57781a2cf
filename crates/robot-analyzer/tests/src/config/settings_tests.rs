use serde_json::json;
use tower_lsp::lsp_types::MessageType;

use super::*;

#[test]
fn parses_namespaced_payload() {
    let payload = json!({
        "robot-analyzer": {
            "completion": {
                "enable": false,
                "matchMode": "substring",
                "implicitBuiltIn": false
            },
            "indexing": {
                "maxFileSizeKb": 256,
                "excludePaths": ["results", " /tmp/generated "],
                "extensions": [".ROBOT", "resource"]
            },
            "logging": {
                "level": "debug"
            }
        }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert!(!settings.completion.enable);
    assert_eq!(settings.completion.match_mode, MatchMode::Substring);
    assert!(!settings.completion.implicit_builtin);
    assert_eq!(settings.indexing.max_file_size_kb, 256);
    assert_eq!(settings.indexing.exclude_paths, vec!["results".to_string(), "/tmp/generated".to_string()]);
    assert_eq!(settings.indexing.extensions, vec!["robot".to_string(), "resource".to_string()]);
    assert_eq!(settings.logging.level, LogLevel::Debug);
}

#[test]
fn parses_direct_payload() {
    let payload = json!({
        "completion": { "matchMode": "prefix" },
        "indexing": { "enable": false }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.completion.match_mode, MatchMode::Prefix);
    assert!(settings.completion.enable);
    assert!(!settings.indexing.enable);
}

#[test]
fn defaults_without_payload() {
    let settings = ServerSettings::from_lsp_payload(None);
    assert!(settings.completion.enable);
    assert!(settings.completion.implicit_builtin);
    assert_eq!(settings.completion.match_mode, MatchMode::Prefix);
    assert_eq!(settings.indexing.max_file_size_bytes(), 512 * 1024);
    assert!(settings.indexing.is_indexed_extension("ROBOT"));
    assert!(settings.indexing.is_indexed_extension("txt"));
    assert!(!settings.indexing.is_indexed_extension("py"));
    assert_eq!(settings.logging.level, LogLevel::Info);
}

#[test]
fn clamps_file_size_limit() {
    let low = ServerSettings::from_lsp_payload(Some(&json!({ "indexing": { "maxFileSizeKb": 1 } })));
    assert_eq!(low.indexing.max_file_size_kb, MIN_MAX_FILE_SIZE_KB);

    let high = ServerSettings::from_lsp_payload(Some(&json!({ "indexing": { "maxFileSizeKb": 1_000_000 } })));
    assert_eq!(high.indexing.max_file_size_kb, MAX_MAX_FILE_SIZE_KB);
}

#[test]
fn preserves_existing_values_when_payload_is_partial() {
    let base = ServerSettings {
        completion: CompletionSettings {
            match_mode: MatchMode::Substring,
            ..CompletionSettings::default()
        },
        ..ServerSettings::default()
    };
    let payload = json!({
        "indexing": {
            "excludePaths": ["output"]
        }
    });

    let merged = base.merged_with_payload(&payload);
    assert_eq!(merged.completion.match_mode, MatchMode::Substring);
    assert_eq!(merged.indexing.exclude_paths, vec!["output".to_string()]);
}

#[test]
fn ignores_unknown_keys() {
    let payload = json!({
        "robot-analyzer": {
            "completion": { "fuzzy": true, "enable": false },
            "somethingElse": 3
        }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert!(!settings.completion.enable);
}

#[test]
fn invalid_values_leave_settings_untouched() {
    let payload = json!({ "completion": { "matchMode": "fuzzy" } });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.completion.match_mode, MatchMode::Prefix);
}

#[test]
fn log_level_gates_client_messages() {
    assert!(LogLevel::Debug.forwards(MessageType::INFO));
    assert!(LogLevel::Info.forwards(MessageType::INFO));
    assert!(!LogLevel::Warn.forwards(MessageType::INFO));
    assert!(LogLevel::Warn.forwards(MessageType::WARNING));
    assert!(!LogLevel::Info.forwards(MessageType::LOG));
}

#[test]
fn warning_is_accepted_for_warn() {
    let payload = json!({ "logging": { "level": "warning" } });
    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.logging.level, LogLevel::Warn);
}
