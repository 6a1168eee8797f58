use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::members::clients::MemberApi;
use crate::features::members::handlers;

/// Routes of the member admin screens, relative to `/api/admin`
pub fn routes(api: Arc<dyn MemberApi>) -> Router {
    Router::new()
        .route("/members", get(handlers::list_members))
        .route(
            "/members/new",
            get(handlers::new_member_form).post(handlers::create_member),
        )
        .route(
            "/members/{id}",
            get(handlers::edit_member_form)
                .put(handlers::update_member)
                .delete(handlers::delete_member_from_list),
        )
        .route("/members/{id}/delete", post(handlers::delete_member))
        .with_state(api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::members::clients::testing::{member, Call, FakeMemberApi};
    use crate::features::members::models::{MemberGrade, MemberRole, MemberStatus};
    use crate::shared::types::PaginationQuery;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server(api: Arc<FakeMemberApi>) -> TestServer {
        TestServer::new(Router::new().nest("/api/admin", routes(api))).unwrap()
    }

    #[tokio::test]
    async fn test_list_defaults_paging() {
        let api = Arc::new(FakeMemberApi::new().with_members(3));
        let server = server(api.clone());

        let response = server.get("/api/admin/members").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["page"], 1);
        assert_eq!(body["data"]["limit"], 10);
        assert_eq!(body["data"]["state"]["pagination"]["totalMembers"], 3);
        assert_eq!(api.calls(), vec![Call::List(PaginationQuery::default())]);
    }

    #[tokio::test]
    async fn test_list_passes_query_through() {
        let api = Arc::new(FakeMemberApi::new().with_members(3));
        let server = server(api.clone());

        server
            .get("/api/admin/members")
            .add_query_param("page", 4)
            .add_query_param("limit", 50)
            .await
            .assert_status_ok();

        assert_eq!(api.calls(), vec![Call::List(PaginationQuery { page: 4, limit: 50 })]);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let api = Arc::new(FakeMemberApi::new());
        let server = server(api.clone());

        let response = server
            .post("/api/admin/members/new")
            .json(&json!({
                "email": "not-an-email",
                "password": "secret1",
                "name": "김바리",
                "phone": "010"
            }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["errors"][0], "유효한 이메일 주소를 입력해주세요.");
        assert_eq!(body["data"]["form"]["password"], "");
        assert!(api.write_calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_member() {
        let api = Arc::new(FakeMemberApi::new());
        let server = server(api.clone());

        let response = server
            .post("/api/admin/members/new")
            .json(&json!({
                "email": "barista@roastery.kr",
                "password": "secret1",
                "name": "김바리",
                "phone": "010",
                "grade": "VIP"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["redirect"], "/admin/members");
    }

    #[tokio::test]
    async fn test_update_without_password() {
        let api = Arc::new(FakeMemberApi::new().with_members(1));
        let server = server(api.clone());

        server
            .put("/api/admin/members/1")
            .json(&json!({ "password": "", "name": "김바리", "phone": "010" }))
            .await
            .assert_status_ok();

        match api.write_calls().as_slice() {
            [Call::Update(1, input)] => assert!(input.password.is_none()),
            other => panic!("unexpected calls {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_partial_edit_keeps_grade_status_and_role() {
        let mut target = member(4);
        target.grade = MemberGrade::Vip;
        target.status = MemberStatus::Dormant;
        target.role = MemberRole::Admin;
        let api = Arc::new(FakeMemberApi::new().with_member(target));
        let server = server(api.clone());

        server
            .put("/api/admin/members/4")
            .json(&json!({ "name": "새이름", "phone": "010" }))
            .await
            .assert_status_ok();

        match api.write_calls().as_slice() {
            [Call::Update(4, input)] => {
                assert_eq!(input.name.as_deref(), Some("새이름"));
                assert_eq!(input.grade, Some(MemberGrade::Vip));
                assert_eq!(input.status, Some(MemberStatus::Dormant));
                assert_eq!(input.role, Some(MemberRole::Admin));
                assert!(input.password.is_none());
            }
            other => panic!("unexpected calls {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_member_redirects_to_list() {
        let server = server(Arc::new(FakeMemberApi::new()));

        let response = server
            .get("/api/admin/members/77")
            .expect_failure()
            .await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["data"]["redirect"], "/admin/members");
    }

    #[tokio::test]
    async fn test_list_delete_keeps_page() {
        let api = Arc::new(FakeMemberApi::new().with_members(3));
        let server = server(api.clone());

        server
            .delete("/api/admin/members/2")
            .add_query_param("page", 1)
            .add_query_param("limit", 2)
            .await
            .assert_status_ok();

        let query = PaginationQuery { page: 1, limit: 2 };
        assert_eq!(
            api.calls(),
            vec![Call::List(query), Call::Delete(2), Call::List(query)]
        );
    }
}
