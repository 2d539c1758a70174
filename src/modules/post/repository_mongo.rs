use std::time::Duration;

use bson::{doc, oid::ObjectId, Document};
use futures_util::TryStreamExt;
use mongodb::{options::ReturnDocument, Collection, Database};

use crate::{
    api::error,
    constants::POSTS_COLLECTION,
    modules::post::{
        model::{InsertPost, UpdatePost},
        repository::PostRepository,
        schema::PostEntity,
    },
    utils::with_timeout,
};

#[derive(Clone)]
pub struct PostRepositoryMongo {
    collection: Collection<PostEntity>,
    timeout: Duration,
}

impl PostRepositoryMongo {
    pub fn new(database: &Database, timeout: Duration) -> Self {
        Self { collection: database.collection(POSTS_COLLECTION), timeout }
    }
}

fn update_document(post: &UpdatePost) -> Document {
    let mut set = Document::new();
    if let Some(title) = &post.title {
        set.insert("title", title.as_str());
    }
    if let Some(content) = &post.content {
        set.insert("content", content.as_str());
    }
    if let Some(author) = &post.author {
        set.insert("author", author.as_str());
    }
    doc! { "$set": set }
}

#[async_trait::async_trait]
impl PostRepository for PostRepositoryMongo {
    async fn create(&self, post: &InsertPost) -> Result<PostEntity, error::SystemError> {
        let entity = PostEntity {
            id: ObjectId::new(),
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            created_at: post.created_at,
        };

        with_timeout(self.timeout, self.collection.insert_one(&entity)).await?;
        Ok(entity)
    }

    async fn find_all(&self) -> Result<Vec<PostEntity>, error::SystemError> {
        let posts = with_timeout(self.timeout, async {
            let cursor = self.collection.find(doc! {}).await?;
            cursor.try_collect::<Vec<_>>().await
        })
        .await?;
        Ok(posts)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<PostEntity>, error::SystemError> {
        let post = with_timeout(self.timeout, self.collection.find_one(doc! { "_id": *id })).await?;
        Ok(post)
    }

    async fn update_by_id(
        &self,
        id: &ObjectId,
        post: &UpdatePost,
    ) -> Result<Option<PostEntity>, error::SystemError> {
        let updated = with_timeout(
            self.timeout,
            self.collection
                .find_one_and_update(doc! { "_id": *id }, update_document(post))
                .return_document(ReturnDocument::After),
        )
        .await?;
        Ok(updated)
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<PostEntity>, error::SystemError> {
        let deleted =
            with_timeout(self.timeout, self.collection.find_one_and_delete(doc! { "_id": *id }))
                .await?;
        Ok(deleted)
    }
}
