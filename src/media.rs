use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// MIME type the service expects for recorded sessions
pub const VIDEO_MIME: &str = "video/mp4";

/// Read-only handle on a locally captured video
///
/// The capture subsystem owns the file; the client only reads it when the
/// upload is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    path: PathBuf,
}

impl MediaRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Like `new`, but checks that the path points at a regular file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to stat media file {}", path.display()))?;

        if !metadata.is_file() {
            anyhow::bail!("Media path {} is not a file", path.display());
        }

        info!("Media file: {} ({} bytes)", path.display(), metadata.len());

        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name sent with the multipart upload
    pub fn upload_file_name(session_id: &str) -> String {
        format!("session-{}.mp4", session_id)
    }

    /// Read the whole video into memory
    pub async fn load(&self) -> Result<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read media file {}", self.path.display()))?;

        debug!("Loaded {} bytes from {}", bytes.len(), self.path.display());

        Ok(bytes)
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
