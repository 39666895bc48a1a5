use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{info, warn};

use crate::domain::{
    models::AvatarToken,
    ports::outbound::{BlobSink, BlobStore},
    AvatarError,
};

const BLOB_EXTENSION: &str = "png";
const PARTIAL_SUFFIX: &str = "part";

/// Avatar blobs stored as `{directory}/{token}.png`.
///
/// Writes go to `{token}.png.part` and are renamed into place once complete,
/// so a file under the final name is always whole.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    directory: PathBuf,
}

impl FsBlobStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub async fn initialize(&self) -> Result<(), AvatarError> {
        fs::create_dir_all(&self.directory).await?;
        info!("Avatar directory initialized at: {}", self.directory.display());
        Ok(())
    }

    pub fn blob_path(&self, token: &AvatarToken) -> Result<PathBuf, AvatarError> {
        let stem = token.as_str();
        let valid = !stem.is_empty()
            && stem
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AvatarError::io(format!("invalid avatar token '{stem}'")));
        }

        Ok(self.directory.join(format!("{stem}.{BLOB_EXTENSION}")))
    }
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

struct FsBlobSink {
    file: Option<fs::File>,
    partial: PathBuf,
    target: PathBuf,
}

#[async_trait]
impl BlobSink for FsBlobSink {
    async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), AvatarError> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| AvatarError::io("blob sink already closed"))?;
        file.write_all(chunk).await?;
        Ok(())
    }

    async fn finish(mut self: Box<Self>) -> Result<(), AvatarError> {
        let mut file = self
            .file
            .take()
            .ok_or_else(|| AvatarError::io("blob sink already closed"))?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&self.partial, &self.target).await?;
        // Renamed into place: nothing left for Drop to clean up.
        self.partial.clear();
        Ok(())
    }
}

impl Drop for FsBlobSink {
    fn drop(&mut self) {
        if self.partial.as_os_str().is_empty() {
            return;
        }

        self.file.take();
        // Single blocking unlink: the part file must be gone by the time the
        // sink is dropped, so it is not deferred to spawn_blocking.
        if let Err(e) = std::fs::remove_file(&self.partial) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Failed to remove partial blob {}: {}",
                    self.partial.display(),
                    e
                );
            }
        }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn open_write(&self, token: &AvatarToken) -> Result<Box<dyn BlobSink>, AvatarError> {
        let target = self.blob_path(token)?;
        let partial = partial_path(&target);
        let file = fs::File::create(&partial).await?;

        Ok(Box::new(FsBlobSink {
            file: Some(file),
            partial,
            target,
        }))
    }

    async fn read_all(&self, token: &AvatarToken) -> Result<Vec<u8>, AvatarError> {
        let path = self.blob_path(token)?;
        Ok(fs::read(&path).await?)
    }

    async fn delete(&self, token: &AvatarToken) -> Result<(), AvatarError> {
        let path = self.blob_path(token)?;
        fs::remove_file(&path).await?;
        Ok(())
    }
}
