#![allow(dead_code)]

use phpctor_lsp::{Backend, InserterConfig};
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

/// A backend that indents with four spaces, which keeps expected PHP
/// readable in test sources.
pub fn create_spaces_backend() -> Backend {
    Backend::new_test_with_config(InserterConfig {
        indent: "    ".to_string(),
        ..InserterConfig::default()
    })
}

/// Helper: send `didOpen` for `text` under `uri`.
pub async fn open_document(backend: &Backend, uri: &Url, text: &str) {
    let params = DidOpenTextDocumentParams {
        text_document: TextDocumentItem {
            uri: uri.clone(),
            language_id: "php".to_string(),
            version: 1,
            text: text.to_string(),
        },
    };
    backend.did_open(params).await;
}

/// Helper: run the insert command with the given raw arguments.
pub async fn execute_insert(
    backend: &Backend,
    arguments: Vec<serde_json::Value>,
) -> Option<serde_json::Value> {
    let params = ExecuteCommandParams {
        command: phpctor_lsp::INSERT_COMMAND.to_string(),
        arguments,
        work_done_progress_params: WorkDoneProgressParams::default(),
    };
    backend
        .execute_command(params)
        .await
        .expect("execute_command should not fail")
}
