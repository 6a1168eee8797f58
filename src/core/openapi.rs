use utoipa::{Modify, OpenApi};

use crate::features::categories::{
    dtos as categories_dtos, handlers as categories_handlers, models as categories_models,
    tree as categories_tree,
};
use crate::features::members::{
    dtos as members_dtos, handlers as members_handlers, models as members_models,
};
use crate::shared::screen::{FormStatus, Notice, NoticeLevel, RedirectView};
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::validation::FieldError;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::delete_category_from_list,
        categories_handlers::new_category_form,
        categories_handlers::create_category,
        categories_handlers::edit_category_form,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Members
        members_handlers::list_members,
        members_handlers::delete_member_from_list,
        members_handlers::new_member_form,
        members_handlers::create_member,
        members_handlers::edit_member_form,
        members_handlers::update_member,
        members_handlers::delete_member,
    ),
    components(
        schemas(
            // Shared
            Meta,
            FieldError,
            Notice,
            NoticeLevel,
            FormStatus,
            RedirectView,
            ApiResponse<RedirectView>,
            // Categories
            categories_models::Category,
            categories_models::CreateCategoryInput,
            categories_models::UpdateCategoryInput,
            categories_tree::CategoryRow,
            categories_tree::ParentOption,
            categories_dtos::CategoryForm,
            categories_dtos::CategoryFormPatch,
            categories_dtos::CategoryListState,
            categories_dtos::CategoryListView,
            categories_dtos::CategoryFormView,
            ApiResponse<categories_dtos::CategoryListView>,
            ApiResponse<categories_dtos::CategoryFormView>,
            // Members
            members_models::Member,
            members_models::MemberGrade,
            members_models::MemberStatus,
            members_models::MemberRole,
            members_models::Pagination,
            members_models::CreateMemberInput,
            members_models::UpdateMemberInput,
            members_dtos::MemberCreateForm,
            members_dtos::MemberEditForm,
            members_dtos::MemberEditPatch,
            members_dtos::MemberListState,
            members_dtos::MemberListView,
            members_dtos::MemberCreateView,
            members_dtos::MemberEditView,
            ApiResponse<members_dtos::MemberListView>,
            ApiResponse<members_dtos::MemberCreateView>,
            ApiResponse<members_dtos::MemberEditView>,
        )
    ),
    tags(
        (name = "admin-categories", description = "Category tree screens (list, new, edit)"),
        (name = "admin-members", description = "Member account screens (list, new, edit)"),
    ),
    info(
        title = "Roastery Admin API",
        version = "0.1.0",
        description = "Admin console screens for the category tree and member accounts"
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_admin_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/admin/categories",
            "/api/admin/categories/new",
            "/api/admin/categories/{id}",
            "/api/admin/categories/{id}/delete",
            "/api/admin/members",
            "/api/admin/members/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Staging Admin".to_string(),
            version: "2.0.0".to_string(),
            description: "staging".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Staging Admin");
        assert_eq!(doc.info.description.as_deref(), Some("staging"));
    }
}
