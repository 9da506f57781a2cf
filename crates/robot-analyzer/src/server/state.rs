use std::{path::PathBuf, sync::Arc};

use tokio::sync::RwLock;
use tower_lsp::{Client, lsp_types::WorkspaceFolder};

use crate::{completion::CompletionProvider, config::ServerSettings, document::DocumentStore, syntax::ParseCache};

/// The robot-analyzer backend that implements the Language Server Protocol.
pub struct RobotLanguageServer {
    /// The LSP client handle, used to send notifications back.
    pub(crate) client: Client,

    /// Thread-safe store of all open documents.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Parsed lines of open documents and of every file reached through
    /// imports or workspace indexing.
    pub(crate) parse_cache: Arc<ParseCache>,

    /// Provides keyword completion items.
    pub(crate) completion_provider: Arc<CompletionProvider>,

    /// Workspace root folders, populated during `initialize`.
    pub(crate) workspace_roots: RwLock<Vec<WorkspaceFolder>>,

    /// Runtime server settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,
}

impl RobotLanguageServer {
    /// Create a new `RobotLanguageServer` wired to the given LSP client.
    pub fn new(client: Client) -> Self {
        let parse_cache = Arc::new(ParseCache::new());
        let completion_provider = Arc::new(CompletionProvider::new(Arc::clone(&parse_cache)));

        Self {
            client,
            document_store: Arc::new(DocumentStore::new()),
            parse_cache,
            completion_provider,
            workspace_roots: RwLock::new(Vec::new()),
            settings: Arc::new(RwLock::new(ServerSettings::default())),
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        self.parse_cache.set_max_file_size(settings.indexing.max_file_size_bytes());
        *self.settings.write().await = settings;
    }

    /// Workspace roots that are local directories. Relative resource
    /// imports are also resolved against these.
    pub(crate) async fn search_roots(&self) -> Vec<PathBuf> {
        self.workspace_roots.read().await.iter().filter_map(|folder| folder.uri.to_file_path().ok()).collect()
    }
}
