//! System clipboard access for `pm get`.

use std::thread;
use std::time::Duration;

use arboard::Clipboard;

use crate::errors::{PmError, Result};

/// A password sitting on the clipboard.
///
/// The handle is kept alive until `clear_after` returns; on some
/// platforms the contents disappear as soon as it is dropped.
pub struct CopiedSecret {
    clipboard: Clipboard,
}

/// Put `text` on the system clipboard.
pub fn copy(text: &str) -> Result<CopiedSecret> {
    let mut clipboard = Clipboard::new().map_err(|e| PmError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| PmError::ClipboardError(e.to_string()))?;
    tracing::debug!("password copied to clipboard");
    Ok(CopiedSecret { clipboard })
}

impl CopiedSecret {
    /// Block for `wait`, then clear the clipboard.
    pub fn clear_after(mut self, wait: Duration) -> Result<()> {
        thread::sleep(wait);
        self.clipboard
            .clear()
            .map_err(|e| PmError::ClipboardError(e.to_string()))?;
        tracing::debug!(secs = wait.as_secs(), "clipboard cleared");
        Ok(())
    }
}
