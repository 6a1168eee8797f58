use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::members::clients::MemberApi;
use crate::features::members::dtos::{
    validate_member_edit_form, MemberEditForm, MemberEditPatch, MemberEditView,
    MEMBER_DELETE_CONFIRMATION, MEMBER_UPDATE_CONFIRMATION,
};
use crate::features::members::models::Member;
use crate::shared::constants::MEMBER_LIST_ROUTE;
use crate::shared::screen::{FormStatus, Notice, ScreenAbort, Submission};
use crate::shared::validation::FieldError;

/// Member detail/edit screen
pub struct MemberEditScreen {
    api: Arc<dyn MemberApi>,
    member_id: i64,
    email: String,
    status: FormStatus,
    form: MemberEditForm,
    field_errors: Vec<FieldError>,
    notice: Option<Notice>,
    redirect: Option<String>,
}

impl MemberEditScreen {
    /// Fetch the member; any failure aborts back to the member list.
    pub async fn open(api: Arc<dyn MemberApi>, member_id: i64) -> Result<Self, ScreenAbort> {
        let member = api.get_member(member_id).await.map_err(|e| {
            tracing::error!("Failed to fetch member {}: {}", member_id, e);
            ScreenAbort {
                redirect: MEMBER_LIST_ROUTE.to_string(),
                notice: Notice::error("회원 정보를 불러오는데 실패했습니다."),
                error: e,
            }
        })?;

        Ok(Self {
            api,
            member_id,
            email: member.email.clone(),
            status: FormStatus::Idle,
            form: MemberEditForm::from_member(&member),
            field_errors: Vec::new(),
            notice: None,
            redirect: None,
        })
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Submit only the fields present in `patch`; grade, status and role the
    /// operator did not send keep the fetched values.
    pub async fn submit_patch(&mut self, patch: MemberEditPatch) -> Submission<Member> {
        let form = self.form.merged(patch);
        self.submit(form).await
    }

    pub async fn submit(&mut self, form: MemberEditForm) -> Submission<Member> {
        if !self.status.accepts_actions() {
            return busy();
        }

        self.form = form;
        self.field_errors.clear();

        let input = match validate_member_edit_form(&self.form) {
            Ok(input) => input,
            Err(errors) => {
                self.notice = errors.first().map(|e| Notice::warning(e.message.clone()));
                self.field_errors = errors.clone();
                return Submission::Rejected(errors);
            }
        };

        self.status = FormStatus::Submitting;
        match self.api.update_member(self.member_id, &input).await {
            Ok(updated) => {
                self.finish(Notice::info("회원 정보가 수정되었습니다."));
                Submission::Saved {
                    value: updated,
                    redirect: MEMBER_LIST_ROUTE.to_string(),
                }
            }
            Err(e) => {
                tracing::error!("Failed to update member {}: {}", self.member_id, e);
                self.status = FormStatus::Idle;
                self.notice = Some(Notice::from_error("수정 실패", &e));
                Submission::Failed(e)
            }
        }
    }

    pub async fn delete(&mut self) -> Submission<i64> {
        if !self.status.accepts_actions() {
            return busy();
        }

        self.status = FormStatus::Deleting;
        match self.api.delete_member(self.member_id).await {
            Ok(deleted_id) => {
                self.finish(Notice::info("회원이 삭제되었습니다."));
                Submission::Saved {
                    value: deleted_id,
                    redirect: MEMBER_LIST_ROUTE.to_string(),
                }
            }
            Err(e) => {
                tracing::error!("Failed to delete member {}: {}", self.member_id, e);
                self.status = FormStatus::Idle;
                self.notice = Some(Notice::from_error("삭제 중 오류가 발생했습니다", &e));
                Submission::Failed(e)
            }
        }
    }

    pub fn view(&self) -> MemberEditView {
        MemberEditView {
            member_id: self.member_id,
            email: self.email.clone(),
            status: self.status,
            form: self.form.redacted(),
            field_errors: self.field_errors.clone(),
            notice: self.notice.clone(),
            redirect: self.redirect.clone(),
            submit_confirmation: MEMBER_UPDATE_CONFIRMATION.to_string(),
            delete_confirmation: MEMBER_DELETE_CONFIRMATION.to_string(),
        }
    }

    fn finish(&mut self, notice: Notice) {
        self.status = FormStatus::Done;
        self.notice = Some(notice);
        self.redirect = Some(MEMBER_LIST_ROUTE.to_string());
    }
}

fn busy<T>() -> Submission<T> {
    Submission::Failed(AppError::BadRequest(
        "이미 처리 중인 요청이 있습니다.".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::members::clients::testing::{member, Call, FakeMemberApi};
    use crate::features::members::models::{MemberGrade, MemberRole, MemberStatus};

    async fn open(api: &Arc<FakeMemberApi>, id: i64) -> MemberEditScreen {
        match MemberEditScreen::open(api.clone(), id).await {
            Ok(screen) => screen,
            Err(abort) => panic!("screen aborted: {:?}", abort),
        }
    }

    #[tokio::test]
    async fn test_open_prefills_without_password() {
        let target = member(4);
        let api = Arc::new(FakeMemberApi::new().with_member(target.clone()));

        let view = open(&api, 4).await.view();

        assert_eq!(view.email, target.email);
        assert_eq!(view.form.name, target.name);
        assert!(view.form.password.is_empty());
    }

    #[tokio::test]
    async fn test_missing_member_aborts_to_list() {
        let api = Arc::new(FakeMemberApi::new());

        let abort = match MemberEditScreen::open(api, 9).await {
            Ok(_) => panic!("expected abort"),
            Err(abort) => abort,
        };

        assert_eq!(abort.redirect, MEMBER_LIST_ROUTE);
        assert_eq!(abort.notice.message, "회원 정보를 불러오는데 실패했습니다.");
    }

    #[tokio::test]
    async fn test_blank_password_is_not_sent() {
        let api = Arc::new(FakeMemberApi::new().with_member(member(4)));
        let mut screen = open(&api, 4).await;
        let mut form = screen.view().form;
        form.grade = MemberGrade::Gold;

        let outcome = screen.submit(form).await;

        assert!(outcome.is_saved());
        match api.write_calls().as_slice() {
            [Call::Update(4, input)] => {
                assert!(input.password.is_none());
                assert_eq!(input.grade, Some(MemberGrade::Gold));
                let body = serde_json::to_value(input).unwrap();
                assert!(body.get("password").is_none());
            }
            other => panic!("unexpected calls {:?}", other),
        }
        assert_eq!(screen.status(), FormStatus::Done);
    }

    #[tokio::test]
    async fn test_contact_only_patch_keeps_grade_and_role() {
        let mut target = member(4);
        target.grade = MemberGrade::Vip;
        target.role = MemberRole::Admin;
        target.status = MemberStatus::Dormant;
        let api = Arc::new(FakeMemberApi::new().with_member(target));
        let mut screen = open(&api, 4).await;

        let patch = MemberEditPatch {
            name: Some("새이름".to_string()),
            phone: Some("010".to_string()),
            ..Default::default()
        };
        assert!(screen.submit_patch(patch).await.is_saved());

        match api.write_calls().as_slice() {
            [Call::Update(4, input)] => {
                assert_eq!(input.grade, Some(MemberGrade::Vip));
                assert_eq!(input.status, Some(MemberStatus::Dormant));
                assert_eq!(input.role, Some(MemberRole::Admin));
                assert!(input.password.is_none());
            }
            other => panic!("unexpected calls {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_short_password_is_rejected_locally() {
        let api = Arc::new(FakeMemberApi::new().with_member(member(4)));
        let mut screen = open(&api, 4).await;
        let mut form = screen.view().form;
        form.password = "123".to_string();

        let outcome = screen.submit(form).await;

        assert!(matches!(outcome, Submission::Rejected(_)));
        assert!(api.write_calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_navigates_to_list() {
        let api = Arc::new(FakeMemberApi::new().with_member(member(4)));
        let mut screen = open(&api, 4).await;

        let outcome = screen.delete().await;

        assert_eq!(outcome.redirect(), Some(MEMBER_LIST_ROUTE));
        assert_eq!(api.write_calls(), vec![Call::Delete(4)]);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_form() {
        let api = Arc::new(
            FakeMemberApi::new()
                .with_member(member(4))
                .failing_writes(AppError::BadRequest("연락처 형식이 올바르지 않습니다.".to_string())),
        );
        let mut screen = open(&api, 4).await;
        let mut form = screen.view().form;
        form.phone = "not-a-phone".to_string();

        let outcome = screen.submit(form).await;

        assert!(!outcome.is_saved());
        let view = screen.view();
        assert_eq!(view.status, FormStatus::Idle);
        assert_eq!(view.form.phone, "not-a-phone");
        assert_eq!(
            view.notice.map(|n| n.message),
            Some("수정 실패: 연락처 형식이 올바르지 않습니다.".to_string())
        );
    }
}
