use std::time::Duration;

use crate::constants::DEFAULT_MAX_UPLOAD_BYTES;

/// File as received from the client, fully buffered and within the size limit.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub field_name: String,
    pub original_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Object handed to a storage backend under its generated key.
#[derive(Debug, Clone)]
pub struct NewObject {
    pub key: String,
    pub field_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// File upload configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_file_size: usize,
    pub timeout: Duration,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { max_file_size: DEFAULT_MAX_UPLOAD_BYTES, timeout: Duration::from_secs(10) }
    }
}
