use crate::config::AppConfig;
use crate::services::storage::{LocalMediaStore, MEDIA_BASE};
use std::sync::Arc;
use tracing::info;

/// Local media store rooted at `MEDIA_ROOT`, with the public upload directory created up front
pub async fn setup_storage(config: &AppConfig) -> anyhow::Result<Arc<LocalMediaStore>> {
    let root = &config.media_root;
    tokio::fs::create_dir_all(root.join(MEDIA_BASE))
        .await
        .map_err(|e| anyhow::anyhow!("Cannot create media root {}: {}", root.display(), e))?;

    info!("🖼️  Media root: {}", root.display());
    Ok(Arc::new(LocalMediaStore::new(root.clone())))
}
