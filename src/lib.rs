//! PHPctor: insert constructor-assigned properties into PHP classes.
//!
//! The core is a line-based heuristic, not a parser:
//!
//! - [`scanner`] classifies every line of the document and records where
//!   the class body, trait uses, properties and constructor are.
//! - [`planner`] turns that record into one [`InsertionPlan`]: a new
//!   constructor when there is none, otherwise a rebuilt constructor with
//!   one more parameter and assignment.
//! - [`snippet`] handles the placeholder markup of the generated text.
//!
//! [`Backend`] exposes this as a language server: the
//! `phpConstructor.insert` command returns the plan for snippet-capable
//! clients, and a code action carries the same edit as plain text.
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tower_lsp::Client;

pub mod config;
pub mod error;
pub mod planner;
pub mod scanner;
pub mod snippet;
pub mod source;
pub mod types;

mod server;
mod util;

pub use config::InserterConfig;
pub use error::{ConfigError, InsertError};
pub use planner::{DEFAULT_PROPERTY_NAME, plan_document, plan_insertion};
pub use scanner::scan;
pub use source::{SourceLine, SourceView, TextDocument};
pub use types::{
    ConstructorDecl, Declarations, EditTarget, InsertionPlan, LineKind, Visibility,
};
pub use util::{apply_text_edit, position_to_offset};

/// Command id of the insert operation.
pub const INSERT_COMMAND: &str = "phpConstructor.insert";

pub struct Backend {
    name: String,
    version: String,
    /// Maps a document URI to its last synced text.
    open_files: Arc<Mutex<HashMap<String, String>>>,
    config: Arc<Mutex<InserterConfig>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client: Some(client),
            ..Self::new_test()
        }
    }

    /// A backend with no client attached, for tests.
    pub fn new_test() -> Self {
        Self::new_test_with_config(InserterConfig::default())
    }

    pub fn new_test_with_config(config: InserterConfig) -> Self {
        Self {
            name: "PHPctor".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            config: Arc::new(Mutex::new(config)),
            workspace_root: Arc::new(Mutex::new(None)),
            client: None,
        }
    }

    /// Snapshot of the current settings.
    pub fn config(&self) -> InserterConfig {
        self.config.lock().clone()
    }

    pub fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace_root.lock().clone()
    }
}
