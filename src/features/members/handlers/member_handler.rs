use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::core::extractor::AppJson;
use crate::features::members::clients::MemberApi;
use crate::features::members::dtos::{
    MemberCreateForm, MemberCreateView, MemberEditPatch, MemberEditView, MemberListView,
};
use crate::features::members::screens::{MemberEditScreen, MemberListScreen, MemberNewScreen};
use crate::shared::screen::{Notice, RedirectView, ScreenAbort};
use crate::shared::types::{ApiResponse, PaginationQuery};
use crate::shared::validation::FieldError;

type ApiState = State<Arc<dyn MemberApi>>;

fn respond<T: Serialize>(
    status: StatusCode,
    view: T,
    notice: Option<&Notice>,
    field_errors: &[FieldError],
) -> Response {
    let message = notice.map(|n| n.message.clone());
    let errors = field_errors.iter().map(|e| e.message.clone()).collect();
    (
        status,
        Json(ApiResponse::view(status.is_success(), view, message, errors)),
    )
        .into_response()
}

fn list_response(status: StatusCode, view: MemberListView) -> Response {
    let notice = view.notice.clone();
    respond(status, view, notice.as_ref(), &[])
}

fn create_response(status: StatusCode, view: MemberCreateView) -> Response {
    let (notice, errors) = (view.notice.clone(), view.field_errors.clone());
    respond(status, view, notice.as_ref(), &errors)
}

fn edit_response(status: StatusCode, view: MemberEditView) -> Response {
    let (notice, errors) = (view.notice.clone(), view.field_errors.clone());
    respond(status, view, notice.as_ref(), &errors)
}

/// Member list screen (one page)
#[utoipa::path(
    get,
    path = "/api/admin/members",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List screen snapshot", body = ApiResponse<MemberListView>),
    ),
    tag = "admin-members"
)]
pub async fn list_members(State(api): ApiState, Query(query): Query<PaginationQuery>) -> Response {
    let mut screen = MemberListScreen::new(api, query);
    screen.load().await;
    list_response(StatusCode::OK, screen.view())
}

/// Delete a member from the list screen, then re-fetch the same page
#[utoipa::path(
    delete,
    path = "/api/admin/members/{id}",
    params(
        ("id" = i64, Path, description = "Member ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Deleted, page re-fetched", body = ApiResponse<MemberListView>),
        (status = 404, description = "Member not found", body = ApiResponse<MemberListView>)
    ),
    tag = "admin-members"
)]
pub async fn delete_member_from_list(
    State(api): ApiState,
    Path(id): Path<i64>,
    Query(query): Query<PaginationQuery>,
) -> Response {
    let mut screen = MemberListScreen::new(api, query);
    screen.load().await;
    let status = match screen.delete(id).await {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    list_response(status, screen.view())
}

/// Open the "new member" screen
#[utoipa::path(
    get,
    path = "/api/admin/members/new",
    responses(
        (status = 200, description = "Blank form with SILVER / ACTIVE / USER defaults", body = ApiResponse<MemberCreateView>),
    ),
    tag = "admin-members"
)]
pub async fn new_member_form(State(api): ApiState) -> Response {
    create_response(StatusCode::OK, MemberNewScreen::open(api).view())
}

/// Register a member
#[utoipa::path(
    post,
    path = "/api/admin/members/new",
    request_body = MemberCreateForm,
    responses(
        (status = 201, description = "Registered; follow `redirect`", body = ApiResponse<MemberCreateView>),
        (status = 422, description = "Rejected before reaching the backend", body = ApiResponse<MemberCreateView>),
        (status = 409, description = "Refused by the backend", body = ApiResponse<MemberCreateView>)
    ),
    tag = "admin-members"
)]
pub async fn create_member(
    State(api): ApiState,
    AppJson(form): AppJson<MemberCreateForm>,
) -> Response {
    let mut screen = MemberNewScreen::open(api);
    let outcome = screen.submit(form).await;
    create_response(outcome.status(StatusCode::CREATED), screen.view())
}

/// Open the member edit screen
#[utoipa::path(
    get,
    path = "/api/admin/members/{id}",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Prefilled form", body = ApiResponse<MemberEditView>),
        (status = 404, description = "Member not found; follow `redirect`", body = ApiResponse<RedirectView>)
    ),
    tag = "admin-members"
)]
pub async fn edit_member_form(
    State(api): ApiState,
    Path(id): Path<i64>,
) -> Result<Response, ScreenAbort> {
    let screen = MemberEditScreen::open(api, id).await?;
    Ok(edit_response(StatusCode::OK, screen.view()))
}

/// Update a member.
///
/// Keys left out of the body keep their current values; a blank or missing
/// password leaves the current one unchanged.
#[utoipa::path(
    put,
    path = "/api/admin/members/{id}",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    request_body = MemberEditPatch,
    responses(
        (status = 200, description = "Updated; follow `redirect`", body = ApiResponse<MemberEditView>),
        (status = 404, description = "Member not found", body = ApiResponse<RedirectView>),
        (status = 422, description = "Rejected before reaching the backend", body = ApiResponse<MemberEditView>)
    ),
    tag = "admin-members"
)]
pub async fn update_member(
    State(api): ApiState,
    Path(id): Path<i64>,
    AppJson(patch): AppJson<MemberEditPatch>,
) -> Result<Response, ScreenAbort> {
    let mut screen = MemberEditScreen::open(api, id).await?;
    let outcome = screen.submit_patch(patch).await;
    Ok(edit_response(outcome.status(StatusCode::OK), screen.view()))
}

/// Delete from the member edit screen
#[utoipa::path(
    post,
    path = "/api/admin/members/{id}/delete",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Deleted; follow `redirect`", body = ApiResponse<MemberEditView>),
        (status = 404, description = "Member not found", body = ApiResponse<RedirectView>)
    ),
    tag = "admin-members"
)]
pub async fn delete_member(
    State(api): ApiState,
    Path(id): Path<i64>,
) -> Result<Response, ScreenAbort> {
    let mut screen = MemberEditScreen::open(api, id).await?;
    let outcome = screen.delete().await;
    Ok(edit_response(outcome.status(StatusCode::OK), screen.view()))
}
