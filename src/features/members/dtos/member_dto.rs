use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::members::models::{
    CreateMemberInput, Member, MemberGrade, MemberRole, MemberStatus, Pagination,
    UpdateMemberInput,
};
use crate::shared::screen::{FormStatus, Notice};
use crate::shared::validation::{
    to_field_errors, validate_optional_password, FieldError, EMAIL_REGEX,
};

pub const MEMBER_DELETE_CONFIRMATION: &str =
    "정말로 이 회원을 삭제하시겠습니까?\n삭제된 데이터는 복구할 수 없습니다.";
pub const MEMBER_UPDATE_CONFIRMATION: &str = "회원 정보를 수정하시겠습니까?";

// =============================================================================
// FORMS
// =============================================================================

/// "New member" form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreateForm {
    #[serde(default)]
    #[validate(custom(function = "validate_member_email"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_required_password"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "이름은 필수입니다."))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "연락처는 필수입니다."))]
    pub phone: String,

    #[serde(default)]
    pub grade: MemberGrade,
    #[serde(default)]
    pub status: MemberStatus,
    #[serde(default)]
    pub role: MemberRole,
}

/// Member edit form. The email is read-only and not part of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberEditForm {
    /// Blank keeps the current password
    #[serde(default)]
    #[validate(custom(function = "validate_optional_password"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "이름은 필수입니다."))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "연락처는 필수입니다."))]
    pub phone: String,

    #[serde(default)]
    pub grade: MemberGrade,
    #[serde(default)]
    pub status: MemberStatus,
    #[serde(default)]
    pub role: MemberRole,
}

/// Edit-screen submission; keys left out of the body keep the fetched values
/// (a missing `password` keeps the current password).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberEditPatch {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub grade: Option<MemberGrade>,
    #[serde(default)]
    pub status: Option<MemberStatus>,
    #[serde(default)]
    pub role: Option<MemberRole>,
}

impl MemberCreateForm {
    /// Copy safe to send back to the console (password cleared)
    pub fn redacted(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

impl MemberEditForm {
    pub fn from_member(member: &Member) -> Self {
        Self {
            password: String::new(),
            name: member.name.clone(),
            phone: member.phone.clone(),
            grade: member.grade,
            status: member.status,
            role: member.role,
        }
    }

    pub fn redacted(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }

    /// Overlay the keys present in `patch`
    pub fn merged(&self, patch: MemberEditPatch) -> Self {
        Self {
            password: patch.password.unwrap_or_default(),
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            phone: patch.phone.unwrap_or_else(|| self.phone.clone()),
            grade: patch.grade.unwrap_or(self.grade),
            status: patch.status.unwrap_or(self.status),
            role: patch.role.unwrap_or(self.role),
        }
    }
}

pub fn validate_member_create_form(
    form: &MemberCreateForm,
) -> Result<CreateMemberInput, Vec<FieldError>> {
    form.validate().map_err(|e| to_field_errors(&e))?;

    Ok(CreateMemberInput {
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        name: form.name.clone(),
        phone: form.phone.clone(),
        grade: form.grade,
        status: form.status,
        role: form.role,
    })
}

/// A blank password becomes `None`, so the update body carries no password key.
pub fn validate_member_edit_form(
    form: &MemberEditForm,
) -> Result<UpdateMemberInput, Vec<FieldError>> {
    form.validate().map_err(|e| to_field_errors(&e))?;

    Ok(UpdateMemberInput {
        name: Some(form.name.clone()),
        phone: Some(form.phone.clone()),
        password: Some(form.password.clone()).filter(|p| !p.is_empty()),
        grade: Some(form.grade),
        status: Some(form.status),
        role: Some(form.role),
    })
}

fn validate_member_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("이메일은 필수입니다.")));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("email")
            .with_message(Cow::Borrowed("유효한 이메일 주소를 입력해주세요.")));
    }
    Ok(())
}

fn validate_required_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("비밀번호는 필수입니다.")));
    }
    validate_optional_password(password)
}

// =============================================================================
// VIEWS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MemberListState {
    Loading,
    Ready {
        members: Vec<Member>,
        pagination: Pagination,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberListView {
    pub state: MemberListState,
    pub page: u32,
    pub limit: u32,
    pub notice: Option<Notice>,
    pub delete_confirmation: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreateView {
    pub status: FormStatus,
    /// Last submitted values, password cleared
    pub form: MemberCreateForm,
    pub field_errors: Vec<FieldError>,
    pub notice: Option<Notice>,
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberEditView {
    pub member_id: i64,
    /// Shown read-only
    pub email: String,
    pub status: FormStatus,
    pub form: MemberEditForm,
    pub field_errors: Vec<FieldError>,
    pub notice: Option<Notice>,
    pub redirect: Option<String>,
    pub submit_confirmation: String,
    pub delete_confirmation: String,
}
