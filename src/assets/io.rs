use std::path::{Path, PathBuf};

use crate::errors::{MeshVideoError, Result};

/// Asset reader trait
///
/// Asynchronous byte access to the files of one recording folder.
pub trait AssetReader: Send + Sync {
    /// Reads the whole resource at `uri`, relative to the reader's root.
    fn read_bytes(&self, uri: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Local file reader
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

impl AssetReader for FileAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.root_path.join(uri);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(MeshVideoError::AssetNotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
