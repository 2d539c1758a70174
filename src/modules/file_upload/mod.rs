pub mod handle;
pub mod model;
pub mod route;
pub mod schema;
pub mod service;
pub mod storage;
pub mod storage_disk;
pub mod storage_s3;

pub use model::UploadConfig;
pub use service::FileUploadService;
pub use storage::FileStorage;
pub use storage_disk::DiskStorage;
pub use storage_s3::S3Storage;
