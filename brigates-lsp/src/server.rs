//! Main language server implementation

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::features::semantic_tokens::{
    collect_semantic_tokens, encode_semantic_tokens, semantic_tokens_legend,
};
use brigates_config::ServerConfig;
use brigates_scanner::{Cancellation, SemanticSpan};
use tokio::sync::RwLock;
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    InitializeParams, InitializeResult, InitializedParams, MessageType, SemanticTokens,
    SemanticTokensFullOptions, SemanticTokensOptions, SemanticTokensParams, SemanticTokensResult,
    SemanticTokensServerCapabilities, ServerCapabilities, ServerInfo, TextDocumentItem,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url, WorkDoneProgressOptions,
};
use tower_lsp::Client;
use tracing::{debug, info, warn};

#[async_trait]
pub trait LspClient: Send + Sync + Clone + 'static {
    async fn log_message(&self, typ: MessageType, message: String);
}

#[async_trait]
impl LspClient for Client {
    async fn log_message(&self, typ: MessageType, message: String) {
        Client::log_message(self, typ, message).await;
    }
}

pub trait FeatureProvider: Send + Sync + 'static {
    fn semantic_tokens(&self, text: &str, cancellation: &dyn Cancellation) -> Vec<SemanticSpan>;
}

#[derive(Default)]
pub struct DefaultFeatureProvider;

impl DefaultFeatureProvider {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureProvider for DefaultFeatureProvider {
    fn semantic_tokens(&self, text: &str, cancellation: &dyn Cancellation) -> Vec<SemanticSpan> {
        collect_semantic_tokens(text, cancellation)
    }
}

#[derive(Clone)]
struct DocumentEntry {
    text: Arc<String>,
    /// Raised when this version of the document is replaced or closed.
    cancelled: Arc<AtomicBool>,
}

impl DocumentEntry {
    fn new(text: String) -> Self {
        Self {
            text: Arc::new(text),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

#[derive(Default)]
struct DocumentStore {
    entries: RwLock<HashMap<Url, DocumentEntry>>,
}

impl DocumentStore {
    async fn upsert(&self, uri: Url, text: String) {
        let previous = self
            .entries
            .write()
            .await
            .insert(uri, DocumentEntry::new(text));
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    async fn contains(&self, uri: &Url) -> bool {
        self.entries.read().await.contains_key(uri)
    }

    async fn get(&self, uri: &Url) -> Option<DocumentEntry> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn remove(&self, uri: &Url) {
        if let Some(entry) = self.entries.write().await.remove(uri) {
            entry.cancel();
        }
    }
}

pub struct BrigatesLanguageServer<C = Client, P = DefaultFeatureProvider> {
    client: C,
    config: ServerConfig,
    documents: DocumentStore,
    features: Arc<P>,
}

impl BrigatesLanguageServer<Client, DefaultFeatureProvider> {
    pub fn new(client: Client, config: ServerConfig) -> Self {
        Self::with_features(client, config, Arc::new(DefaultFeatureProvider::new()))
    }
}

impl<C, P> BrigatesLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    pub fn with_features(client: C, config: ServerConfig, features: Arc<P>) -> Self {
        Self {
            client,
            config,
            documents: DocumentStore::default(),
            features,
        }
    }

    async fn scan_document(&self, uri: &Url) -> Option<Vec<SemanticSpan>> {
        let DocumentEntry { text, cancelled } = self.documents.get(uri).await?;
        let features = Arc::clone(&self.features);
        let scan = tokio::task::spawn_blocking(move || {
            features.semantic_tokens(text.as_str(), cancelled.as_ref())
        });
        match scan.await {
            Ok(spans) => Some(spans),
            Err(err) => {
                warn!(%uri, error = %err, "semantic token scan did not complete");
                None
            }
        }
    }
}

#[async_trait]
impl<C, P> tower_lsp::LanguageServer for BrigatesLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            semantic_tokens_provider: Some(
                SemanticTokensServerCapabilities::SemanticTokensOptions(SemanticTokensOptions {
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                    legend: semantic_tokens_legend(),
                    range: None,
                    full: Some(SemanticTokensFullOptions::Bool(true)),
                }),
            ),
            ..ServerCapabilities::default()
        };

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "brigates-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!(language_ids = ?self.config.language_ids, "brigates-lsp initialized");
        self.client
            .log_message(
                MessageType::INFO,
                format!(
                    "brigates-lsp {} highlighting {}",
                    env!("CARGO_PKG_VERSION"),
                    self.config.language_ids.join(", ")
                ),
            )
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let TextDocumentItem {
            uri,
            language_id,
            text,
            ..
        } = params.text_document;
        if !self.config.accepts(&language_id) {
            debug!(%uri, %language_id, "ignoring document");
            return;
        }
        self.documents.upsert(uri, text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if !self.documents.contains(&uri).await {
            return;
        }
        if let Some(change) = params.content_changes.into_iter().last() {
            self.documents.upsert(uri, change.text).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.remove(&params.text_document.uri).await;
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let uri = params.text_document.uri;
        let Some(spans) = self.scan_document(&uri).await else {
            return Ok(None);
        };
        debug!(%uri, spans = spans.len(), "semantic tokens computed");
        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
            result_id: None,
            data: encode_semantic_tokens(&spans),
        })))
    }
}
