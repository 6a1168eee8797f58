use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::categories::models::{Category, CreateCategoryInput, UpdateCategoryInput};
use crate::features::categories::tree::{CategoryRow, ParentOption};
use crate::shared::constants::CATEGORY_NAME_MAX_LEN;
use crate::shared::screen::{FormStatus, Notice};
use crate::shared::validation::{form_value, optional_form_value, to_field_errors, FieldError};

/// Confirmation shown before a category delete; states the backend contract
/// that children of the deleted node become roots.
pub const DELETE_CONFIRMATION: &str = "정말 삭제하시겠습니까?\n하위 카테고리는 최상위로 이동됩니다.";

// =============================================================================
// FORM
// =============================================================================

/// Category form exactly as the controls hold it.
///
/// `parentId` is the selected option value (`""` for the root choice) and
/// `sortOrder` the raw number input; both are parsed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    #[serde(default)]
    #[validate(custom(function = "validate_category_name"))]
    pub name: String,

    #[serde(default, deserialize_with = "form_value")]
    #[validate(custom(function = "validate_parent_selection"))]
    pub parent_id: String,

    #[serde(default, deserialize_with = "form_value")]
    #[validate(custom(function = "validate_sort_order"))]
    pub sort_order: String,
}

/// Edit-screen submission; keys left out of the body keep the prefilled value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFormPatch {
    #[serde(default)]
    pub name: Option<String>,

    /// `null` or `""` selects the root
    #[serde(default, deserialize_with = "optional_form_value")]
    pub parent_id: Option<String>,

    #[serde(default, deserialize_with = "optional_form_value")]
    pub sort_order: Option<String>,
}

/// Category form after validation and normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCategoryInput {
    pub name: String,
    pub parent_id: Option<i64>,
    pub sort_order: i32,
}

impl CategoryForm {
    /// Blank form of the "new" screen
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            parent_id: String::new(),
            sort_order: "0".to_string(),
        }
    }

    /// Overlay the keys present in `patch`
    pub fn merged(&self, patch: CategoryFormPatch) -> Self {
        Self {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            parent_id: patch.parent_id.unwrap_or_else(|| self.parent_id.clone()),
            sort_order: patch.sort_order.unwrap_or_else(|| self.sort_order.clone()),
        }
    }

    /// Prefill from a fetched category (edit screen)
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            parent_id: category
                .parent_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            sort_order: category.sort_order.to_string(),
        }
    }
}

/// Validate and normalize a category form without touching the network.
pub fn validate_category_form(form: &CategoryForm) -> Result<ValidCategoryInput, Vec<FieldError>> {
    form.validate().map_err(|e| to_field_errors(&e))?;

    let parent_id =
        parse_parent_id(&form.parent_id).map_err(|e| vec![field_error("parentId", e)])?;
    let sort_order =
        parse_sort_order(&form.sort_order).map_err(|e| vec![field_error("sortOrder", e)])?;

    Ok(ValidCategoryInput {
        name: form.name.trim().to_string(),
        parent_id,
        sort_order,
    })
}

impl ValidCategoryInput {
    pub fn into_create(self) -> CreateCategoryInput {
        CreateCategoryInput {
            name: self.name,
            parent_id: self.parent_id,
            sort_order: Some(self.sort_order),
        }
    }

    /// The edit form always carries all three fields
    pub fn into_update(self) -> UpdateCategoryInput {
        UpdateCategoryInput {
            name: Some(self.name),
            parent_id: Some(self.parent_id),
            sort_order: Some(self.sort_order),
        }
    }
}

/// Normalize the parent selector value: `""` and `"0"` mean "root".
pub fn parse_parent_id(raw: &str) -> Result<Option<i64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "0" {
        return Ok(None);
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(ValidationError::new("parent_id")
            .with_message(Cow::Borrowed("상위 카테고리 값이 올바르지 않습니다."))),
    }
}

/// Parse the sort order input; blank means 0.
pub fn parse_sort_order(raw: &str) -> Result<i32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<i32>().map_err(|_| {
        ValidationError::new("sort_order")
            .with_message(Cow::Borrowed("정렬 순서는 숫자여야 합니다."))
    })
}

fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("카테고리명은 필수입니다.")));
    }
    if name.chars().count() as u64 > CATEGORY_NAME_MAX_LEN {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("카테고리명은 50자를 넘을 수 없습니다.")));
    }
    Ok(())
}

fn validate_parent_selection(raw: &str) -> Result<(), ValidationError> {
    parse_parent_id(raw).map(|_| ())
}

fn validate_sort_order(raw: &str) -> Result<(), ValidationError> {
    parse_sort_order(raw).map(|_| ())
}

fn field_error(field: &str, err: ValidationError) -> FieldError {
    let message = err
        .message
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string());
    FieldError::new(field, message)
}

// =============================================================================
// VIEWS
// =============================================================================

/// State of the list screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryListState {
    Loading,
    Ready { rows: Vec<CategoryRow> },
    Error { message: String },
}

/// Snapshot of the category list screen
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListView {
    pub state: CategoryListState,
    pub notice: Option<Notice>,
    pub delete_confirmation: String,
}

/// Snapshot of the new/edit category screens
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFormView {
    /// Category being edited; `None` on the new screen
    pub category_id: Option<i64>,
    pub status: FormStatus,
    pub form: CategoryForm,
    pub root_option_label: String,
    pub parent_options: Vec<ParentOption>,
    pub field_errors: Vec<FieldError>,
    pub notice: Option<Notice>,
    pub redirect: Option<String>,
    /// Confirmation text for the delete control (edit screen only)
    pub delete_confirmation: Option<String>,
}
