mod common;

use common::{create_test_backend, open_document};
use phpctor_lsp::Visibility;
use serde_json::json;
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

#[tokio::test]
async fn test_initialize_server_info() {
    let backend = create_test_backend();
    let params = InitializeParams::default();
    let result = backend.initialize(params).await.unwrap();

    let server_info = result.server_info.expect("server_info should be present");
    assert_eq!(server_info.name, "PHPctor");
    assert_eq!(
        server_info.version,
        Some(env!("CARGO_PKG_VERSION").to_string())
    );
}

#[tokio::test]
async fn test_initialize_capabilities() {
    let backend = create_test_backend();
    let params = InitializeParams::default();
    let result = backend.initialize(params).await.unwrap();

    assert_eq!(result.offset_encoding, None);

    let caps = result.capabilities;
    assert!(
        caps.code_action_provider.is_some(),
        "Code actions should be enabled"
    );
    let commands = caps
        .execute_command_provider
        .expect("executeCommand should be enabled")
        .commands;
    assert_eq!(commands, vec![phpctor_lsp::INSERT_COMMAND.to_string()]);
    assert_eq!(
        caps.text_document_sync,
        Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL))
    );
}

#[tokio::test]
async fn test_initialization_options_configure_visibility() {
    let backend = create_test_backend();
    let params = InitializeParams {
        initialization_options: Some(json!({
            "phpConstructor": {
                "visibility": "protected",
                "constructor_visibility": "private"
            }
        })),
        ..InitializeParams::default()
    };
    backend.initialize(params).await.unwrap();

    let config = backend.config();
    assert_eq!(config.visibility, Visibility::Protected);
    assert_eq!(config.constructor_visibility, Visibility::Private);
}

#[tokio::test]
async fn test_workspace_config_file_is_loaded() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(
        dir.path().join(".phpctor.toml"),
        "constructor_visibility = \"protected\"\n",
    )
    .expect("failed to write config");

    let backend = create_test_backend();
    let params = InitializeParams {
        root_uri: Some(Url::from_directory_path(dir.path()).unwrap()),
        ..InitializeParams::default()
    };
    backend.initialize(params).await.unwrap();

    assert_eq!(
        backend.config().constructor_visibility,
        Visibility::Protected
    );
    assert_eq!(backend.workspace_root(), Some(dir.path().to_path_buf()));
}

#[tokio::test]
async fn test_did_change_configuration_updates_settings() {
    let backend = create_test_backend();
    backend
        .did_change_configuration(DidChangeConfigurationParams {
            settings: json!({ "phpConstructor": { "visibility": "public" } }),
        })
        .await;

    assert_eq!(backend.config().visibility, Visibility::Public);
    assert_eq!(backend.config().constructor_visibility, Visibility::Public);
}

#[tokio::test]
async fn test_did_open_stores_file() {
    let backend = create_test_backend();
    let uri = Url::parse("file:///test.php").unwrap();
    let text = "<?php\nclass Stored {\n}\n";

    open_document(&backend, &uri, text).await;

    assert_eq!(backend.get_open_file(uri.as_str()).as_deref(), Some(text));
}

#[tokio::test]
async fn test_did_change_replaces_content() {
    let backend = create_test_backend();
    let uri = Url::parse("file:///test.php").unwrap();
    open_document(&backend, &uri, "<?php\n").await;

    backend
        .did_change(DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier {
                uri: uri.clone(),
                version: 2,
            },
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "<?php\nclass Changed {\n}\n".to_string(),
            }],
        })
        .await;

    assert_eq!(
        backend.get_open_file(uri.as_str()).as_deref(),
        Some("<?php\nclass Changed {\n}\n")
    );
}

#[tokio::test]
async fn test_did_close_forgets_file() {
    let backend = create_test_backend();
    let uri = Url::parse("file:///test.php").unwrap();
    open_document(&backend, &uri, "<?php\n").await;

    backend
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
        })
        .await;

    assert!(backend.get_open_file(uri.as_str()).is_none());
}

#[tokio::test]
async fn test_shutdown() {
    let backend = create_test_backend();
    assert!(backend.shutdown().await.is_ok());
}
