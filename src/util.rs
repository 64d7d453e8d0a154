/// Utility functions for the PHPctor server.
///
/// This module contains helpers for position/offset conversion, applying a
/// `TextEdit` to a string, and the `Backend` helpers that look up open
/// documents, plan against them and talk back to the client.
use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::error::InsertError;
use crate::planner;
use crate::source::utf16_to_byte;
use crate::types::InsertionPlan;

/// Convert an LSP Position (line, UTF-16 character) to a byte offset in
/// content.  Positions past the last line map to the end of the content.
pub fn position_to_offset(content: &str, position: Position) -> usize {
    let mut offset = 0;
    for (i, line) in content.split('\n').enumerate() {
        if i == position.line as usize {
            let text = line.strip_suffix('\r').unwrap_or(line);
            return offset + utf16_to_byte(text, position.character);
        }
        // +1 for the newline character
        offset += line.len() + 1;
    }
    content.len()
}

/// Apply a single edit to `content` and return the result.
pub fn apply_text_edit(content: &str, edit: &TextEdit) -> String {
    let start = position_to_offset(content, edit.range.start);
    let end = position_to_offset(content, edit.range.end).max(start);

    let mut out = String::with_capacity(content.len() + edit.new_text.len());
    out.push_str(&content[..start]);
    out.push_str(&edit.new_text);
    out.push_str(&content[end..]);
    out
}

impl Backend {
    /// Text of an open document, if the client has synced it.
    pub fn get_open_file(&self, uri: &str) -> Option<String> {
        self.open_files.lock().get(uri).cloned()
    }

    /// Scan the open document at `uri` and plan an insertion for
    /// `property_name`.  `None` when the document is not open.
    pub fn plan_for_uri(
        &self,
        uri: &str,
        property_name: &str,
    ) -> Option<Result<InsertionPlan, InsertError>> {
        let content = self.get_open_file(uri)?;
        let config = self.config.lock().clone();
        Some(planner::plan_document(&content, &config, property_name))
    }

    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }

    /// Move the client's cursor to `position` and scroll it into view.
    pub(crate) async fn reveal(&self, uri: &str, position: Position) {
        let Some(client) = &self.client else {
            return;
        };
        let Ok(uri) = Url::parse(uri) else {
            return;
        };

        let params = ShowDocumentParams {
            uri,
            external: Some(false),
            take_focus: Some(true),
            selection: Some(Range {
                start: position,
                end: position,
            }),
        };
        if let Err(e) = client.show_document(params).await {
            tracing::debug!(error = %e, "client did not reveal the insertion point");
        }
    }

    /// Tell the user why nothing was inserted.
    pub(crate) async fn report_failure(&self, uri: &str, error: &InsertError) {
        tracing::warn!(uri, error = %error, "constructor property insertion failed");
        if let Some(client) = &self.client {
            client
                .show_message(
                    MessageType::WARNING,
                    format!("Cannot insert constructor property: {error}"),
                )
                .await;
        }
    }
}
