use bson::oid::ObjectId;
use chrono::SubsecRound;
use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::api::error;
use crate::modules::post::{
    model::{CreatePostModel, InsertPost, PostResponse, UpdatePost, UpdatePostModel},
    repository::PostRepository,
};

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository + Send + Sync>,
}

fn parse_id(id: &str) -> Result<ObjectId, error::SystemError> {
    ObjectId::parse_str(id)
        .map_err(|_| error::SystemError::invalid_id(format!("'{id}' is not a valid post id")))
}

impl PostService {
    pub fn with_dependencies(repo: Arc<dyn PostRepository + Send + Sync>) -> Self {
        info!("PostService initialized with dependencies");
        PostService { repo }
    }

    pub async fn create(&self, post: CreatePostModel) -> Result<PostResponse, error::SystemError> {
        post.validate()?;

        let new_post = InsertPost {
            title: post.title,
            content: post.content,
            author: post.author,
            // BSON dates hold milliseconds
            created_at: chrono::Utc::now().trunc_subsecs(3),
        };

        let entity = self.repo.create(&new_post).await?;
        info!("Post {} created", entity.id);
        Ok(PostResponse::from(entity))
    }

    pub async fn list(&self) -> Result<Vec<PostResponse>, error::SystemError> {
        let posts = self.repo.find_all().await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<PostResponse, error::SystemError> {
        let id = parse_id(id)?;
        self.repo
            .find_by_id(&id)
            .await?
            .map(PostResponse::from)
            .ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    pub async fn update_by_id(
        &self,
        id: &str,
        post: UpdatePostModel,
    ) -> Result<PostResponse, error::SystemError> {
        let id = parse_id(id)?;
        if post.is_empty() {
            // nothing to change, answer with the stored state
            return self
                .repo
                .find_by_id(&id)
                .await?
                .map(PostResponse::from)
                .ok_or_else(|| error::SystemError::not_found("Post not found"));
        }
        post.validate()?;

        let update_post =
            UpdatePost { title: post.title, content: post.content, author: post.author };

        self.repo
            .update_by_id(&id, &update_post)
            .await?
            .map(PostResponse::from)
            .ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<PostResponse, error::SystemError> {
        let id = parse_id(id)?;
        let deleted = self
            .repo
            .delete_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;
        info!("Post {} deleted", deleted.id);
        Ok(PostResponse::from(deleted))
    }
}
