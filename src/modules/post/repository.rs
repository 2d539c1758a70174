use bson::oid::ObjectId;

use crate::{
    api::error,
    modules::post::{
        model::{InsertPost, UpdatePost},
        schema::PostEntity,
    },
};

/// Document-store access for posts. Every method is a single round trip.
#[async_trait::async_trait]
pub trait PostRepository {
    async fn create(&self, post: &InsertPost) -> Result<PostEntity, error::SystemError>;

    /// Store-native order; callers must not rely on any sorting.
    async fn find_all(&self) -> Result<Vec<PostEntity>, error::SystemError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<PostEntity>, error::SystemError>;

    /// Returns the post as it is after the update, or `None` when it does not exist.
    async fn update_by_id(
        &self,
        id: &ObjectId,
        post: &UpdatePost,
    ) -> Result<Option<PostEntity>, error::SystemError>;

    /// Returns the removed post, or `None` when it does not exist.
    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<PostEntity>, error::SystemError>;
}
