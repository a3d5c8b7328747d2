use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Public prefix shared by every stored media path
pub const MEDIA_BASE: &str = "uploads";

/// Who a stored file belongs to. Decides the directory it lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOwner {
    /// All category images share `uploads/categories`
    Category,
    /// Vehicle images live under `uploads/vehicles/<sanitized name>`
    Vehicle(String),
}

impl MediaOwner {
    /// Directory relative to the media root, always forward-slash separated
    pub fn relative_dir(&self) -> String {
        match self {
            MediaOwner::Category => format!("{}/categories", MEDIA_BASE),
            MediaOwner::Vehicle(name) => {
                format!("{}/vehicles/{}", MEDIA_BASE, sanitize_owner_key(name))
            }
        }
    }
}

/// Map an arbitrary name onto a single safe path segment.
///
/// Every character outside `[A-Za-z0-9-]` becomes `_`.
pub fn sanitize_owner_key(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist `data` under the owner's directory and return its relative path
    async fn save(&self, owner: &MediaOwner, data: &[u8], original_filename: &str)
    -> io::Result<String>;

    /// Recursively remove the owner's directory. Missing directories are fine.
    async fn delete_all(&self, owner: &MediaOwner) -> io::Result<()>;
}

/// Media store backed by the local filesystem
pub struct LocalMediaStore {
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a path returned by `save` to its location on disk
    pub fn absolute_path(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save(
        &self,
        owner: &MediaOwner,
        data: &[u8],
        original_filename: &str,
    ) -> io::Result<String> {
        let relative_dir = owner.relative_dir();
        let dir = self.absolute_path(&relative_dir);
        tokio::fs::create_dir_all(&dir).await?;

        let extension = Path::new(original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let file_name = format!("{}{}", Uuid::new_v4(), extension);

        tokio::fs::write(dir.join(&file_name), data).await?;

        let relative = format!("{}/{}", relative_dir, file_name);
        tracing::debug!("Stored {} bytes at {}", data.len(), relative);
        Ok(relative)
    }

    async fn delete_all(&self, owner: &MediaOwner) -> io::Result<()> {
        let dir = self.absolute_path(&owner.relative_dir());
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => {
                tracing::info!("Removed media directory {}", dir.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
