use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::{Category, CreateCategoryInput, UpdateCategoryInput};
use crate::modules::backend::{BackendClient, DataEnvelope, DeletedEnvelope};

/// Remote category resource.
///
/// Screens depend on this trait rather than on the HTTP client so they can be
/// driven against an in-memory double.
#[async_trait]
pub trait CategoryApi: Send + Sync {
    /// Full forest, roots in order, children populated recursively
    async fn get_category_tree(&self) -> Result<Vec<Category>>;

    /// One category without its children; `NotFound` when the id is unknown
    async fn get_category(&self, id: i64) -> Result<Category>;

    async fn create_category(&self, input: &CreateCategoryInput) -> Result<Category>;

    /// Partial update; fields left `None` are not sent
    async fn update_category(&self, id: i64, input: &UpdateCategoryInput) -> Result<Category>;

    /// Deletes one category and returns the deleted id. Children of a deleted
    /// node are promoted to root by the backend.
    async fn delete_category(&self, id: i64) -> Result<i64>;
}

/// `CategoryApi` over the REST backend
pub struct HttpCategoryApi {
    backend: Arc<BackendClient>,
}

impl HttpCategoryApi {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl CategoryApi for HttpCategoryApi {
    async fn get_category_tree(&self) -> Result<Vec<Category>> {
        let envelope: DataEnvelope<Vec<Category>> = self.backend.get("/categories").await?;
        Ok(envelope.data)
    }

    async fn get_category(&self, id: i64) -> Result<Category> {
        let envelope: DataEnvelope<Category> =
            self.backend.get(&format!("/categories/{}", id)).await?;
        Ok(envelope.data)
    }

    async fn create_category(&self, input: &CreateCategoryInput) -> Result<Category> {
        let envelope: DataEnvelope<Category> =
            self.backend.post("/admin/categories", input).await?;
        tracing::info!(
            "Created category {} ({:?})",
            envelope.data.id,
            envelope.message
        );
        Ok(envelope.data)
    }

    async fn update_category(&self, id: i64, input: &UpdateCategoryInput) -> Result<Category> {
        let envelope: DataEnvelope<Category> = self
            .backend
            .put(&format!("/admin/categories/{}", id), input)
            .await?;
        tracing::info!("Updated category {} ({:?})", id, envelope.message);
        Ok(envelope.data)
    }

    async fn delete_category(&self, id: i64) -> Result<i64> {
        let envelope: DeletedEnvelope = self
            .backend
            .delete(&format!("/admin/categories/{}", id))
            .await?;
        tracing::info!(
            "Deleted category {} ({:?})",
            envelope.deleted_id,
            envelope.message
        );
        Ok(envelope.deleted_id)
    }
}
