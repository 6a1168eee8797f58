use std::sync::Arc;

use futures::future::join;

use crate::core::error::AppError;
use crate::features::categories::clients::CategoryApi;
use crate::features::categories::dtos::{
    validate_category_form, CategoryForm, CategoryFormPatch, CategoryFormView,
    DELETE_CONFIRMATION,
};
use crate::features::categories::models::Category;
use crate::features::categories::tree::{self, ParentOption};
use crate::shared::constants::{CATEGORY_LIST_ROUTE, ROOT_OPTION_LABEL};
use crate::shared::screen::{FormStatus, Notice, ScreenAbort, Submission};
use crate::shared::validation::FieldError;

const SELF_PARENT_MESSAGE: &str = "자기 자신을 상위 카테고리로 설정할 수 없습니다.";

/// Edit form for one category.
///
/// `loading -> ready -> submitting -> done | ready-with-error`, plus
/// `ready -> deleting -> done | ready-with-error`.
pub struct CategoryEditScreen {
    api: Arc<dyn CategoryApi>,
    category_id: i64,
    status: FormStatus,
    form: CategoryForm,
    parent_options: Vec<ParentOption>,
    field_errors: Vec<FieldError>,
    notice: Option<Notice>,
    redirect: Option<String>,
}

impl CategoryEditScreen {
    /// Fetch the tree and the target concurrently.
    ///
    /// The target is required; without it the screen aborts back to the list.
    /// A failed tree fetch only leaves the parent selector empty.
    pub async fn open(api: Arc<dyn CategoryApi>, category_id: i64) -> Result<Self, ScreenAbort> {
        let (forest, target) = join(api.get_category_tree(), api.get_category(category_id)).await;

        let category = match target {
            Ok(category) => category,
            Err(e) => {
                tracing::error!("Failed to fetch category {}: {}", category_id, e);
                return Err(ScreenAbort {
                    redirect: CATEGORY_LIST_ROUTE.to_string(),
                    notice: Notice::error("카테고리 정보를 찾을 수 없습니다."),
                    error: e,
                });
            }
        };

        let parent_options = match forest {
            Ok(forest) => tree::render_options(&forest, Some(category_id)),
            Err(e) => {
                tracing::warn!("Failed to fetch category tree for parent options: {}", e);
                Vec::new()
            }
        };

        Ok(Self {
            api,
            category_id,
            status: FormStatus::Idle,
            form: CategoryForm::from_category(&category),
            parent_options,
            field_errors: Vec::new(),
            notice: None,
            redirect: None,
        })
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Submit only the fields the operator touched; the rest keep the values
    /// loaded by `open`.
    pub async fn submit_patch(&mut self, patch: CategoryFormPatch) -> Submission<Category> {
        let form = self.form.merged(patch);
        self.submit(form).await
    }

    pub async fn submit(&mut self, form: CategoryForm) -> Submission<Category> {
        if let Some(busy) = self.busy() {
            return busy;
        }

        self.form = form;
        self.field_errors.clear();

        let valid = match validate_category_form(&self.form) {
            Ok(valid) => valid,
            Err(errors) => return self.reject(errors),
        };

        if valid.parent_id == Some(self.category_id) {
            return self.reject(vec![FieldError::new("parentId", SELF_PARENT_MESSAGE)]);
        }

        self.status = FormStatus::Submitting;
        match self
            .api
            .update_category(self.category_id, &valid.into_update())
            .await
        {
            Ok(updated) => {
                tracing::info!("Category {} updated from admin console", updated.id);
                self.finish(Notice::info("수정되었습니다."));
                Submission::Saved {
                    value: updated,
                    redirect: CATEGORY_LIST_ROUTE.to_string(),
                }
            }
            Err(e) => {
                tracing::error!("Failed to update category {}: {}", self.category_id, e);
                self.status = FormStatus::Idle;
                self.notice = Some(Notice::from_error("수정 실패", &e));
                Submission::Failed(e)
            }
        }
    }

    /// Delete the edited category. Its children are promoted by the backend.
    pub async fn delete(&mut self) -> Submission<i64> {
        if let Some(busy) = self.busy() {
            return busy;
        }

        self.status = FormStatus::Deleting;
        match self.api.delete_category(self.category_id).await {
            Ok(deleted_id) => {
                tracing::info!("Category {} deleted from admin console", deleted_id);
                self.finish(Notice::info("삭제되었습니다."));
                Submission::Saved {
                    value: deleted_id,
                    redirect: CATEGORY_LIST_ROUTE.to_string(),
                }
            }
            Err(e) => {
                tracing::error!("Failed to delete category {}: {}", self.category_id, e);
                self.status = FormStatus::Idle;
                self.notice = Some(Notice::from_error("삭제 실패", &e));
                Submission::Failed(e)
            }
        }
    }

    pub fn view(&self) -> CategoryFormView {
        CategoryFormView {
            category_id: Some(self.category_id),
            status: self.status,
            form: self.form.clone(),
            root_option_label: ROOT_OPTION_LABEL.to_string(),
            parent_options: self.parent_options.clone(),
            field_errors: self.field_errors.clone(),
            notice: self.notice.clone(),
            redirect: self.redirect.clone(),
            delete_confirmation: Some(DELETE_CONFIRMATION.to_string()),
        }
    }

    fn busy<T>(&self) -> Option<Submission<T>> {
        if self.status.accepts_actions() {
            return None;
        }
        Some(Submission::Failed(AppError::BadRequest(
            "이미 처리 중인 요청이 있습니다.".to_string(),
        )))
    }

    fn reject<T>(&mut self, errors: Vec<FieldError>) -> Submission<T> {
        self.notice = errors.first().map(|e| Notice::warning(e.message.clone()));
        self.field_errors = errors.clone();
        Submission::Rejected(errors)
    }

    fn finish(&mut self, notice: Notice) {
        self.status = FormStatus::Done;
        self.notice = Some(notice);
        self.redirect = Some(CATEGORY_LIST_ROUTE.to_string());
    }
}
