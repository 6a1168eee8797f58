use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::extractor::AppJson;
use crate::features::categories::clients::CategoryApi;
use crate::features::categories::dtos::{
    CategoryForm, CategoryFormPatch, CategoryFormView, CategoryListView,
};
use crate::features::categories::screens::{
    CategoryEditScreen, CategoryListScreen, CategoryNewScreen,
};
use crate::shared::screen::{RedirectView, ScreenAbort};
use crate::shared::types::ApiResponse;

type ApiState = State<Arc<dyn CategoryApi>>;

fn list_response(status: StatusCode, view: CategoryListView) -> Response {
    let success = status.is_success();
    let message = view.notice.as_ref().map(|n| n.message.clone());
    (status, Json(ApiResponse::view(success, view, message, vec![]))).into_response()
}

fn form_response(status: StatusCode, view: CategoryFormView) -> Response {
    let success = status.is_success();
    let message = view.notice.as_ref().map(|n| n.message.clone());
    let errors = view.field_errors.iter().map(|e| e.message.clone()).collect();
    (status, Json(ApiResponse::view(success, view, message, errors))).into_response()
}

/// Category list screen
///
/// Fetches the whole tree and returns it as flat, indented rows.
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    responses(
        (status = 200, description = "List screen snapshot", body = ApiResponse<CategoryListView>),
    ),
    tag = "admin-categories"
)]
pub async fn list_categories(State(api): ApiState) -> Response {
    let mut screen = CategoryListScreen::new(api);
    screen.load().await;
    list_response(StatusCode::OK, screen.view())
}

/// Delete a row from the list screen
///
/// Children of the deleted category are promoted to roots by the backend; the
/// returned rows come from a fresh fetch.
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Deleted, list re-fetched", body = ApiResponse<CategoryListView>),
        (status = 404, description = "Category not found", body = ApiResponse<CategoryListView>),
        (status = 502, description = "Backend unavailable", body = ApiResponse<CategoryListView>)
    ),
    tag = "admin-categories"
)]
pub async fn delete_category_from_list(State(api): ApiState, Path(id): Path<i64>) -> Response {
    let mut screen = CategoryListScreen::new(api);
    screen.load().await;
    let status = match screen.delete(id).await {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    list_response(status, screen.view())
}

/// Open the "new category" screen
#[utoipa::path(
    get,
    path = "/api/admin/categories/new",
    responses(
        (status = 200, description = "Blank form with parent options", body = ApiResponse<CategoryFormView>),
    ),
    tag = "admin-categories"
)]
pub async fn new_category_form(State(api): ApiState) -> Response {
    let screen = CategoryNewScreen::open(api).await;
    form_response(StatusCode::OK, screen.view())
}

/// Submit the "new category" form
#[utoipa::path(
    post,
    path = "/api/admin/categories/new",
    request_body = CategoryForm,
    responses(
        (status = 201, description = "Created; follow `redirect`", body = ApiResponse<CategoryFormView>),
        (status = 422, description = "Rejected before reaching the backend", body = ApiResponse<CategoryFormView>),
        (status = 409, description = "Refused by the backend", body = ApiResponse<CategoryFormView>)
    ),
    tag = "admin-categories"
)]
pub async fn create_category(State(api): ApiState, AppJson(form): AppJson<CategoryForm>) -> Response {
    let mut screen = CategoryNewScreen::open(api).await;
    let outcome = screen.submit(form).await;
    form_response(outcome.status(StatusCode::CREATED), screen.view())
}

/// Open the edit screen for one category
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Prefilled form", body = ApiResponse<CategoryFormView>),
        (status = 404, description = "Category not found; follow `redirect`", body = ApiResponse<RedirectView>)
    ),
    tag = "admin-categories"
)]
pub async fn edit_category_form(
    State(api): ApiState,
    Path(id): Path<i64>,
) -> Result<Response, ScreenAbort> {
    let screen = CategoryEditScreen::open(api, id).await?;
    Ok(form_response(StatusCode::OK, screen.view()))
}

/// Submit the edit form
///
/// Keys left out of the body keep their current values. Choosing the category
/// itself as its parent is rejected without calling the backend.
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = CategoryFormPatch,
    responses(
        (status = 200, description = "Updated; follow `redirect`", body = ApiResponse<CategoryFormView>),
        (status = 404, description = "Category not found", body = ApiResponse<RedirectView>),
        (status = 422, description = "Rejected before reaching the backend", body = ApiResponse<CategoryFormView>)
    ),
    tag = "admin-categories"
)]
pub async fn update_category(
    State(api): ApiState,
    Path(id): Path<i64>,
    AppJson(patch): AppJson<CategoryFormPatch>,
) -> Result<Response, ScreenAbort> {
    let mut screen = CategoryEditScreen::open(api, id).await?;
    let outcome = screen.submit_patch(patch).await;
    Ok(form_response(outcome.status(StatusCode::OK), screen.view()))
}

/// Delete from the edit screen
#[utoipa::path(
    post,
    path = "/api/admin/categories/{id}/delete",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Deleted; follow `redirect`", body = ApiResponse<CategoryFormView>),
        (status = 404, description = "Category not found", body = ApiResponse<RedirectView>)
    ),
    tag = "admin-categories"
)]
pub async fn delete_category(
    State(api): ApiState,
    Path(id): Path<i64>,
) -> Result<Response, ScreenAbort> {
    let mut screen = CategoryEditScreen::open(api, id).await?;
    let outcome = screen.delete().await;
    Ok(form_response(outcome.status(StatusCode::OK), screen.view()))
}
