use std::path::PathBuf;

use crate::{
    api::error,
    modules::file_upload::{model::NewObject, schema::StorageLocation, storage::FileStorage},
};

/// Writes uploads into a single local directory.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    upload_dir: PathBuf,
}

impl DiskStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self { upload_dir: upload_dir.into() }
    }
}

#[async_trait::async_trait]
impl FileStorage for DiskStorage {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn put(&self, object: NewObject) -> Result<StorageLocation, error::SystemError> {
        // Create upload directory if it doesn't exist
        tokio::fs::create_dir_all(&self.upload_dir).await?;

        let file_path = self.upload_dir.join(&object.key);
        // the key only appears once every byte is on disk
        let partial_path = self.upload_dir.join(format!(".{}.part", object.key));
        if let Err(err) = tokio::fs::write(&partial_path, &object.bytes).await {
            let _ = tokio::fs::remove_file(&partial_path).await;
            return Err(err.into());
        }
        tokio::fs::rename(&partial_path, &file_path).await?;

        Ok(StorageLocation::Local { path: file_path.to_string_lossy().into_owned() })
    }
}
