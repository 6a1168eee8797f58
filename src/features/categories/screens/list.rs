use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::clients::CategoryApi;
use crate::features::categories::dtos::{CategoryListState, CategoryListView, DELETE_CONFIRMATION};
use crate::features::categories::tree;
use crate::shared::screen::Notice;

/// Flat table of the whole category tree.
///
/// `loading -> ready | error`. Rows only change through a full re-fetch; a
/// delete never splices the local rows.
pub struct CategoryListScreen {
    api: Arc<dyn CategoryApi>,
    state: CategoryListState,
    notice: Option<Notice>,
}

impl CategoryListScreen {
    pub fn new(api: Arc<dyn CategoryApi>) -> Self {
        Self {
            api,
            state: CategoryListState::Loading,
            notice: None,
        }
    }

    pub fn state(&self) -> &CategoryListState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, CategoryListState::Ready { .. })
    }

    /// Fetch the tree and rebuild the rows
    pub async fn load(&mut self) {
        self.state = CategoryListState::Loading;
        self.state = match self.api.get_category_tree().await {
            Ok(forest) => CategoryListState::Ready {
                rows: tree::rows(&forest),
            },
            Err(e) => {
                tracing::error!("Failed to fetch categories: {}", e);
                CategoryListState::Error {
                    message: e.user_message(),
                }
            }
        };
    }

    /// Delete one row, then re-fetch.
    ///
    /// On failure the rows are left untouched and an error notice is raised.
    pub async fn delete(&mut self, id: i64) -> Result<i64> {
        if !self.is_ready() {
            let err = AppError::BadRequest(
                "목록을 불러온 뒤에 삭제할 수 있습니다.".to_string(),
            );
            self.notice = Some(Notice::error(err.user_message()));
            return Err(err);
        }

        match self.api.delete_category(id).await {
            Ok(deleted_id) => {
                self.load().await;
                self.notice = Some(if self.is_ready() {
                    Notice::info("삭제되었습니다.")
                } else {
                    Notice::warning("삭제되었지만 목록을 새로 고치지 못했습니다.")
                });
                Ok(deleted_id)
            }
            Err(e) => {
                tracing::error!("Failed to delete category {}: {}", id, e);
                self.notice = Some(Notice::from_error("삭제 중 오류가 발생했습니다", &e));
                Err(e)
            }
        }
    }

    pub fn view(&self) -> CategoryListView {
        CategoryListView {
            state: self.state.clone(),
            notice: self.notice.clone(),
            delete_confirmation: DELETE_CONFIRMATION.to_string(),
        }
    }
}
