use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::members::models::{CreateMemberInput, Member, MemberPage, UpdateMemberInput};
use crate::modules::backend::{BackendClient, DataEnvelope, DeletedEnvelope};
use crate::shared::types::PaginationQuery;

/// Remote member resource
#[async_trait]
pub trait MemberApi: Send + Sync {
    /// One page; `page` and `limit` are forwarded untouched
    async fn list_members(&self, query: PaginationQuery) -> Result<MemberPage>;

    async fn get_member(&self, id: i64) -> Result<Member>;

    async fn create_member(&self, input: &CreateMemberInput) -> Result<Member>;

    async fn update_member(&self, id: i64, input: &UpdateMemberInput) -> Result<Member>;

    async fn delete_member(&self, id: i64) -> Result<i64>;
}

pub struct HttpMemberApi {
    backend: Arc<BackendClient>,
}

impl HttpMemberApi {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl MemberApi for HttpMemberApi {
    async fn list_members(&self, query: PaginationQuery) -> Result<MemberPage> {
        self.backend.get_with_query("/admin/members", &query).await
    }

    async fn get_member(&self, id: i64) -> Result<Member> {
        let envelope: DataEnvelope<Member> =
            self.backend.get(&format!("/admin/members/{}", id)).await?;
        Ok(envelope.data)
    }

    async fn create_member(&self, input: &CreateMemberInput) -> Result<Member> {
        let envelope: DataEnvelope<Member> = self.backend.post("/admin/members", input).await?;
        tracing::info!("Created member {} ({:?})", envelope.data.id, envelope.message);
        Ok(envelope.data)
    }

    async fn update_member(&self, id: i64, input: &UpdateMemberInput) -> Result<Member> {
        let envelope: DataEnvelope<Member> = self
            .backend
            .put(&format!("/admin/members/{}", id), input)
            .await?;
        tracing::info!(
            "Updated member {} (password changed: {})",
            id,
            input.password.is_some()
        );
        Ok(envelope.data)
    }

    async fn delete_member(&self, id: i64) -> Result<i64> {
        let envelope: DeletedEnvelope = self
            .backend
            .delete(&format!("/admin/members/{}", id))
            .await?;
        tracing::info!("Deleted member {} ({:?})", envelope.deleted_id, envelope.message);
        Ok(envelope.deleted_id)
    }
}
