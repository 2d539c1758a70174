use crate::{
    api::error,
    modules::file_upload::{model::NewObject, schema::StorageLocation},
};

#[async_trait::async_trait]
pub trait FileStorage {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    async fn put(&self, object: NewObject) -> Result<StorageLocation, error::SystemError>;
}
