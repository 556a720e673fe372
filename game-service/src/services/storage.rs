use async_trait::async_trait;
use service_core::error::AppError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Persistence for generated games: one HTML document per identifier.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Stores a new document. Fails if `id` is already taken.
    async fn save(&self, id: Uuid, html: &str) -> Result<(), AppError>;
    /// Returns the document, or `None` if no game exists under `id`.
    async fn load(&self, id: Uuid) -> Result<Option<String>, AppError>;
    async fn health_check(&self) -> Result<(), AppError>;
}

/// Flat-file store writing `<uuid>.html` under a single directory.
pub struct LocalGameStore {
    base_path: PathBuf,
}

impl LocalGameStore {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.base_path.join(format!("{}.html", id.as_hyphenated()))
    }
}

#[async_trait]
impl GameStore for LocalGameStore {
    async fn save(&self, id: Uuid, html: &str) -> Result<(), AppError> {
        let path = self.path_for(id);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    AppError::InternalError(anyhow::anyhow!("game {} already exists", id))
                }
                _ => AppError::from(e),
            })?;

        let written = async {
            file.write_all(html.as_bytes()).await?;
            file.flush().await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(AppError::from(e));
        }

        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.path_for(id)).await {
            Ok(html) => Ok(Some(html)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn health_check(&self) -> Result<(), AppError> {
        let metadata = fs::metadata(&self.base_path).await?;
        if metadata.is_dir() {
            Ok(())
        } else {
            Err(AppError::InternalError(anyhow::anyhow!(
                "{} is not a directory",
                self.base_path.display()
            )))
        }
    }
}
