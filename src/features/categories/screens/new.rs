use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::categories::clients::CategoryApi;
use crate::features::categories::dtos::{validate_category_form, CategoryForm, CategoryFormView};
use crate::features::categories::models::Category;
use crate::features::categories::tree::{self, ParentOption};
use crate::shared::constants::{CATEGORY_LIST_ROUTE, ROOT_OPTION_LABEL};
use crate::shared::screen::{FormStatus, Notice, Submission};
use crate::shared::validation::FieldError;

/// "New category" form: `idle -> submitting -> done | idle-with-error`
pub struct CategoryNewScreen {
    api: Arc<dyn CategoryApi>,
    status: FormStatus,
    form: CategoryForm,
    parent_options: Vec<ParentOption>,
    field_errors: Vec<FieldError>,
    notice: Option<Notice>,
    redirect: Option<String>,
}

impl CategoryNewScreen {
    /// Open the screen with a blank form. A failed tree fetch leaves the
    /// parent selector with only the root choice.
    pub async fn open(api: Arc<dyn CategoryApi>) -> Self {
        let mut screen = Self {
            api,
            status: FormStatus::Idle,
            form: CategoryForm::blank(),
            parent_options: Vec::new(),
            field_errors: Vec::new(),
            notice: None,
            redirect: None,
        };

        match screen.api.get_category_tree().await {
            Ok(forest) => screen.parent_options = tree::render_options(&forest, None),
            Err(e) => {
                tracing::warn!("Failed to fetch category tree for parent options: {}", e);
                screen.notice = Some(Notice::warning("상위 카테고리 목록을 불러오지 못했습니다."));
            }
        }

        screen
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub async fn submit(&mut self, form: CategoryForm) -> Submission<Category> {
        if !self.status.accepts_actions() {
            return Submission::Failed(AppError::BadRequest(
                "이미 처리 중인 요청이 있습니다.".to_string(),
            ));
        }

        // keep the operator's input whatever happens next
        self.form = form;
        self.field_errors.clear();

        let valid = match validate_category_form(&self.form) {
            Ok(valid) => valid,
            Err(errors) => {
                self.notice = errors.first().map(|e| Notice::warning(e.message.clone()));
                self.field_errors = errors.clone();
                return Submission::Rejected(errors);
            }
        };

        self.status = FormStatus::Submitting;
        match self.api.create_category(&valid.into_create()).await {
            Ok(created) => {
                tracing::info!("Category {} created from admin console", created.id);
                self.status = FormStatus::Done;
                self.notice = Some(Notice::info("카테고리가 등록되었습니다."));
                self.redirect = Some(CATEGORY_LIST_ROUTE.to_string());
                Submission::Saved {
                    value: created,
                    redirect: CATEGORY_LIST_ROUTE.to_string(),
                }
            }
            Err(e) => {
                tracing::error!("Failed to create category: {}", e);
                self.status = FormStatus::Idle;
                self.notice = Some(Notice::from_error("등록 실패", &e));
                Submission::Failed(e)
            }
        }
    }

    pub fn view(&self) -> CategoryFormView {
        CategoryFormView {
            category_id: None,
            status: self.status,
            form: self.form.clone(),
            root_option_label: ROOT_OPTION_LABEL.to_string(),
            parent_options: self.parent_options.clone(),
            field_errors: self.field_errors.clone(),
            notice: self.notice.clone(),
            redirect: self.redirect.clone(),
            delete_confirmation: None,
        }
    }
}
