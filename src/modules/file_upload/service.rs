use std::path::Path;
use std::sync::Arc;

use crate::api::error;
use crate::modules::file_upload::{
    model::{IncomingFile, NewObject, UploadConfig},
    schema::UploadedFile,
    storage::FileStorage,
};
use crate::utils::with_timeout;

const MAX_KEY_NAME_LEN: usize = 128;

#[derive(Clone)]
pub struct FileUploadService {
    storage: Arc<dyn FileStorage + Send + Sync>,
    config: UploadConfig,
}

/// Reduces a client supplied filename to a single safe path component.
pub fn sanitize_filename(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let cleaned: String = cleaned.chars().take(MAX_KEY_NAME_LEN).collect();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Storage key in the `{epochMillis}-{name}` layout.
pub fn generate_key(original: &str, now: chrono::DateTime<chrono::Utc>) -> String {
    format!("{}-{}", now.timestamp_millis(), sanitize_filename(original))
}

fn resolve_content_type(declared: Option<&str>, filename: &str) -> String {
    match declared.filter(|m| !m.is_empty()) {
        Some(mime) => mime.to_string(),
        None => mime_guess::from_path(Path::new(filename)).first_or_octet_stream().to_string(),
    }
}

impl FileUploadService {
    pub fn new(storage: Arc<dyn FileStorage + Send + Sync>, config: UploadConfig) -> Self {
        log::info!("FileUploadService using '{}' storage", storage.name());
        Self { storage, config }
    }

    pub fn max_file_size(&self) -> usize {
        self.config.max_file_size
    }

    /// Stores one file on the configured backend and describes where it went.
    pub async fn store(&self, file: IncomingFile) -> Result<UploadedFile, error::SystemError> {
        let size = file.bytes.len();
        if size > self.config.max_file_size {
            return Err(error::SystemError::PayloadTooLarge(self.config.max_file_size));
        }

        let key = generate_key(&file.original_name, chrono::Utc::now());
        let content_type = resolve_content_type(file.mime_type.as_deref(), &file.original_name);

        let object = NewObject {
            key: key.clone(),
            field_name: file.field_name.clone(),
            content_type: content_type.clone(),
            bytes: file.bytes,
        };
        let location = with_timeout(self.config.timeout, self.storage.put(object)).await?;
        log::info!("Stored upload '{}' ({} bytes) as {}", file.original_name, size, key);

        Ok(UploadedFile {
            field_name: file.field_name,
            original_name: file.original_name,
            key,
            mime_type: content_type,
            size: size as u64,
            location,
        })
    }
}
