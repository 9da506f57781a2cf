use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tower_lsp::{LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info, warn};

use crate::{config::ServerSettings, server::state::RobotLanguageServer, vfs::FileId};

const CLIENT_NOTIFICATION_PREFIX: &str = "robot-analyzer:";

#[tower_lsp::async_trait]
impl LanguageServer for RobotLanguageServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing robot-analyzer...");

        let initial_settings = ServerSettings::from_lsp_payload(params.initialization_options.as_ref());
        self.apply_settings(initial_settings).await;

        if let Some(folders) = params.workspace_folders {
            *self.workspace_roots.write().await = folders;
        } else if let Some(root) = params.root_uri {
            *self.workspace_roots.write().await = vec![WorkspaceFolder {
                uri: root,
                name: "root".to_string(),
            }];
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                completion_provider: Some(CompletionOptions::default()),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "robot-analyzer".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        info!("robot-analyzer initialized");

        if !self.settings_snapshot().await.indexing.enable {
            info!("Skipping workspace scan because robot-analyzer.indexing.enable=false");
            return;
        }

        let handle = self.clone_for_background().await;
        tokio::spawn(async move {
            handle.index_workspace().await;
        });
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }

        let should_rescan = merged.indexing.enable && merged.indexing != current.indexing;
        self.apply_settings(merged).await;
        info!("Applied updated robot-analyzer settings");

        if should_rescan {
            let handle = self.clone_for_background().await;
            tokio::spawn(async move {
                handle.index_workspace().await;
            });
        }
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down robot-analyzer");
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        let version = params.text_document.version;
        let file = FileId::from_url(&uri);

        info!("Opened {} (v{version}, {} bytes)", file.short_name(), text.len());
        self.parse_cache.update(file.clone(), &text);
        self.document_store.open(uri, text, version);

        self.log_to_client(MessageType::INFO, format!("Opened {}", file.short_name())).await;
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let Some(text) = self.document_store.apply_changes(&uri, params.content_changes, version) else {
            warn!("Change for unknown document: {uri}");
            self.log_to_client(MessageType::WARNING, format!("Ignored change to unopened {}", short_name(&uri))).await;
            return;
        };
        self.parse_cache.update(FileId::from_url(&uri), &text);
    }

    async fn did_save(
        &self,
        params: DidSaveTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let file = FileId::from_url(&uri);
        debug!("Saved {}", file.short_name());

        if let Some(text) = self.document_store.saved(&uri, params.text) {
            self.parse_cache.update(file, &text);
        }
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        if !self.document_store.close(&uri) {
            debug!("Close for unknown document: {uri}");
            return;
        }
        // Imports of this file fall back to its on-disk content.
        self.parse_cache.remove(&FileId::from_url(&uri));
        debug!("Closed {}, {} document(s) still open", short_name(&uri), self.document_store.len());
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let settings = self.settings_snapshot().await;
        let roots = self.search_roots().await;
        let document = self.document_store.get(&uri);

        let items = self.completion_provider.provide(&uri, document.as_ref(), position, &settings.completion, &roots);
        debug!(
            "completion {}:{}:{} → {} item(s)",
            short_name(&uri),
            position.line + 1,
            position.character + 1,
            items.len()
        );
        Ok(Some(CompletionResponse::Array(items)))
    }
}

impl RobotLanguageServer {
    /// Forward a message to the client's log if `logging.level` allows it.
    async fn log_to_client(
        &self,
        kind: MessageType,
        message: String,
    ) {
        if !self.settings_snapshot().await.logging.level.forwards(kind) {
            return;
        }
        let _ = AssertUnwindSafe(self.client.log_message(kind, prefixed_client_message(message))).catch_unwind().await;
    }
}

fn short_name(uri: &Url) -> &str {
    uri.path().rsplit('/').next().unwrap_or(uri.path())
}

fn prefixed_client_message(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}
