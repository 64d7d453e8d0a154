/// LSP server trait implementation.
///
/// This module contains the `impl LanguageServer for Backend` block,
/// which handles all LSP protocol messages (initialize, didOpen, didChange,
/// didClose, configuration changes, executeCommand and codeAction).
use std::collections::HashMap;

use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;

use crate::config::InserterConfig;
use crate::planner::DEFAULT_PROPERTY_NAME;
use crate::{Backend, INSERT_COMMAND};

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Extract and store the workspace root path
        let workspace_root = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok());

        match InserterConfig::load(workspace_root.as_deref()) {
            Ok(config) => *self.config.lock() = config,
            Err(e) => tracing::warn!(error = %e, "falling back to default settings"),
        }
        if let Some(options) = &params.initialization_options {
            self.config.lock().apply_settings(options);
        }
        *self.workspace_root.lock() = workspace_root;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                code_action_provider: Some(CodeActionProviderCapability::Options(
                    CodeActionOptions {
                        code_action_kinds: Some(vec![CodeActionKind::REFACTOR_REWRITE]),
                        work_done_progress_options: WorkDoneProgressOptions::default(),
                        resolve_provider: Some(false),
                    },
                )),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![INSERT_COMMAND.to_string()],
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: self.name.clone(),
                version: Some(self.version.clone()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let config = self.config();
        self.log(
            MessageType::INFO,
            format!(
                "PHPctor initialized! Properties are {}, constructors are {}",
                config.visibility, config.constructor_visibility
            ),
        )
        .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        let uri = doc.uri.to_string();

        self.open_files.lock().insert(uri.clone(), doc.text);

        self.log(MessageType::INFO, format!("Opened file: {}", uri))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        // Full sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.open_files.lock().insert(uri, change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        self.open_files.lock().remove(&uri);

        self.log(MessageType::INFO, format!("Closed file: {}", uri))
            .await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.config.lock().apply_settings(&params.settings);
        tracing::debug!(config = ?self.config(), "settings changed");
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        if params.command != INSERT_COMMAND {
            return Err(Error::invalid_params(format!(
                "unknown command: {}",
                params.command
            )));
        }

        // Arguments: [uri, property name?]
        let mut args = params.arguments.iter();
        let Some(uri) = args.next().and_then(|v| v.as_str()) else {
            tracing::debug!("insert requested without an active document");
            return Ok(None);
        };
        let name = args
            .next()
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_PROPERTY_NAME);

        let Some(result) = self.plan_for_uri(uri, name) else {
            tracing::debug!(uri, "insert requested for a document that is not open");
            return Ok(None);
        };

        match result {
            Ok(plan) => {
                self.reveal(uri, plan.reveal).await;
                let value = serde_json::to_value(&plan).map_err(|e| {
                    tracing::error!(error = %e, "could not serialize insertion plan");
                    Error::internal_error()
                })?;
                Ok(Some(value))
            }
            Err(e) => {
                self.report_failure(uri, &e).await;
                Ok(None)
            }
        }
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let kind = CodeActionKind::REFACTOR_REWRITE;
        if let Some(only) = &params.context.only
            && !only.iter().any(|k| kind.as_str().starts_with(k.as_str()))
        {
            return Ok(None);
        }

        let uri = params.text_document.uri;
        let Some(result) = self.plan_for_uri(uri.as_str(), DEFAULT_PROPERTY_NAME) else {
            return Ok(None);
        };
        let plan = match result {
            Ok(plan) => plan,
            Err(e) => {
                // Not worth a popup: the user did not ask for this one.
                tracing::debug!(uri = %uri, error = %e, "no constructor property action");
                return Ok(None);
            }
        };

        let mut changes = HashMap::new();
        changes.insert(uri, vec![plan.to_text_edit()]);

        Ok(Some(vec![CodeActionOrCommand::CodeAction(CodeAction {
            title: "Add constructor property".to_string(),
            kind: Some(kind),
            edit: Some(WorkspaceEdit {
                changes: Some(changes),
                ..WorkspaceEdit::default()
            }),
            ..CodeAction::default()
        })]))
    }
}
