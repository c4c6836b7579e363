//! Getting a finished site and its marketing text out of the app.

use std::path::{Path, PathBuf};

use tracing::info;

/// File name used for the downloaded site.
pub const DOWNLOAD_NAME: &str = "index.html";

/// Share target for marketing text.
pub const WHATSAPP_URL: &str = "https://wa.me/";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("nothing to export yet")]
    NothingToExport,
}

/// Write `html` to `<dir>/index.html`, creating `dir` if needed.
pub fn save_html(dir: &Path, html: &str) -> Result<PathBuf, ExportError> {
    if html.trim().is_empty() {
        return Err(ExportError::NothingToExport);
    }
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(DOWNLOAD_NAME);
    std::fs::write(&path, html).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), bytes = html.len(), "saved site");
    Ok(path)
}

/// Put `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ExportError> {
    if text.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let mut clipboard = arboard::Clipboard::new().map_err(|e| ExportError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| ExportError::Clipboard(e.to_string()))
}

/// Text and link to hand to a chat app.
pub fn share_text(newsletter: &str) -> Result<(String, &'static str), ExportError> {
    let text = newsletter.trim();
    if text.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    Ok((text.to_string(), WHATSAPP_URL))
}
