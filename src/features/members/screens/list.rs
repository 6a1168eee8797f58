use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::members::clients::MemberApi;
use crate::features::members::dtos::{MemberListState, MemberListView, MEMBER_DELETE_CONFIRMATION};
use crate::shared::screen::Notice;
use crate::shared::types::PaginationQuery;

/// One page of the member table: `loading -> ready | error`
pub struct MemberListScreen {
    api: Arc<dyn MemberApi>,
    query: PaginationQuery,
    state: MemberListState,
    notice: Option<Notice>,
}

impl MemberListScreen {
    pub fn new(api: Arc<dyn MemberApi>, query: PaginationQuery) -> Self {
        Self {
            api,
            query,
            state: MemberListState::Loading,
            notice: None,
        }
    }

    pub fn state(&self) -> &MemberListState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, MemberListState::Ready { .. })
    }

    pub async fn load(&mut self) {
        self.state = MemberListState::Loading;
        self.state = match self.api.list_members(self.query).await {
            Ok(page) => MemberListState::Ready {
                members: page.data,
                pagination: page.pagination,
            },
            Err(e) => {
                tracing::error!("Failed to fetch members (page {}): {}", self.query.page, e);
                MemberListState::Error {
                    message: e.user_message(),
                }
            }
        };
    }

    /// Delete one member and re-fetch the same page
    pub async fn delete(&mut self, id: i64) -> Result<i64> {
        if !self.is_ready() {
            let err = AppError::BadRequest("목록을 불러온 뒤에 삭제할 수 있습니다.".to_string());
            self.notice = Some(Notice::error(err.user_message()));
            return Err(err);
        }

        match self.api.delete_member(id).await {
            Ok(deleted_id) => {
                self.load().await;
                self.notice = Some(if self.is_ready() {
                    Notice::info("회원이 삭제되었습니다.")
                } else {
                    Notice::warning("삭제되었지만 목록을 새로 고치지 못했습니다.")
                });
                Ok(deleted_id)
            }
            Err(e) => {
                tracing::error!("Failed to delete member {}: {}", id, e);
                self.notice = Some(Notice::from_error("삭제 중 오류가 발생했습니다", &e));
                Err(e)
            }
        }
    }

    pub fn view(&self) -> MemberListView {
        MemberListView {
            state: self.state.clone(),
            page: self.query.page,
            limit: self.query.limit,
            notice: self.notice.clone(),
            delete_confirmation: MEMBER_DELETE_CONFIRMATION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::members::clients::testing::{Call, FakeMemberApi};
    use tokio_test::{assert_err, assert_ok};

    fn ids(screen: &MemberListScreen) -> Vec<i64> {
        match screen.state() {
            MemberListState::Ready { members, .. } => members.iter().map(|m| m.id).collect(),
            other => panic!("expected ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_passes_paging_through() {
        let api = Arc::new(FakeMemberApi::new().with_members(12));
        let mut screen = MemberListScreen::new(api.clone(), PaginationQuery { page: 2, limit: 5 });

        screen.load().await;

        assert_eq!(ids(&screen), vec![6, 7, 8, 9, 10]);
        assert_eq!(api.calls(), vec![Call::List(PaginationQuery { page: 2, limit: 5 })]);
        let view = screen.view();
        assert_eq!((view.page, view.limit), (2, 5));
    }

    #[tokio::test]
    async fn test_load_failure() {
        let api = Arc::new(
            FakeMemberApi::new().failing_list(AppError::Forbidden("권한이 없습니다.".to_string())),
        );
        let mut screen = MemberListScreen::new(api, PaginationQuery::default());

        screen.load().await;

        assert_eq!(
            screen.state(),
            &MemberListState::Error {
                message: "권한이 없습니다.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_delete_refetches_same_page() {
        let api = Arc::new(FakeMemberApi::new().with_members(3));
        let query = PaginationQuery { page: 1, limit: 10 };
        let mut screen = MemberListScreen::new(api.clone(), query);
        screen.load().await;

        assert_ok!(screen.delete(2).await);

        assert_eq!(ids(&screen), vec![1, 3]);
        assert_eq!(
            api.calls(),
            vec![Call::List(query), Call::Delete(2), Call::List(query)]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_rows() {
        let api = Arc::new(
            FakeMemberApi::new()
                .with_members(2)
                .failing_writes(AppError::ExternalServiceError("down".to_string())),
        );
        let mut screen = MemberListScreen::new(api, PaginationQuery::default());
        screen.load().await;

        assert_err!(screen.delete(1).await);

        assert_eq!(ids(&screen), vec![1, 2]);
        assert!(screen.view().notice.is_some());
    }
}
