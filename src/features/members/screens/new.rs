use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::members::clients::MemberApi;
use crate::features::members::dtos::{
    validate_member_create_form, MemberCreateForm, MemberCreateView,
};
use crate::features::members::models::Member;
use crate::shared::constants::MEMBER_LIST_ROUTE;
use crate::shared::screen::{FormStatus, Notice, Submission};
use crate::shared::validation::FieldError;

/// "New member" form: `idle -> submitting -> done | idle-with-error`
pub struct MemberNewScreen {
    api: Arc<dyn MemberApi>,
    status: FormStatus,
    form: MemberCreateForm,
    field_errors: Vec<FieldError>,
    notice: Option<Notice>,
    redirect: Option<String>,
}

impl MemberNewScreen {
    pub fn open(api: Arc<dyn MemberApi>) -> Self {
        Self {
            api,
            status: FormStatus::Idle,
            form: MemberCreateForm::default(),
            field_errors: Vec::new(),
            notice: None,
            redirect: None,
        }
    }

    pub async fn submit(&mut self, form: MemberCreateForm) -> Submission<Member> {
        if !self.status.accepts_actions() {
            return Submission::Failed(AppError::BadRequest(
                "이미 처리 중인 요청이 있습니다.".to_string(),
            ));
        }

        self.form = form;
        self.field_errors.clear();

        let input = match validate_member_create_form(&self.form) {
            Ok(input) => input,
            Err(errors) => {
                self.notice = errors.first().map(|e| Notice::warning(e.message.clone()));
                self.field_errors = errors.clone();
                return Submission::Rejected(errors);
            }
        };

        self.status = FormStatus::Submitting;
        match self.api.create_member(&input).await {
            Ok(created) => {
                tracing::info!("Member {} registered from admin console", created.id);
                self.status = FormStatus::Done;
                self.notice = Some(Notice::info("회원이 성공적으로 등록되었습니다."));
                self.redirect = Some(MEMBER_LIST_ROUTE.to_string());
                Submission::Saved {
                    value: created,
                    redirect: MEMBER_LIST_ROUTE.to_string(),
                }
            }
            Err(e) => {
                tracing::error!("Failed to register member: {}", e);
                self.status = FormStatus::Idle;
                self.notice = Some(Notice::from_error("등록 실패", &e));
                Submission::Failed(e)
            }
        }
    }

    pub fn view(&self) -> MemberCreateView {
        MemberCreateView {
            status: self.status,
            form: self.form.redacted(),
            field_errors: self.field_errors.clone(),
            notice: self.notice.clone(),
            redirect: self.redirect.clone(),
        }
    }
}
