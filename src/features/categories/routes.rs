use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::clients::CategoryApi;
use crate::features::categories::handlers;

/// Routes of the category admin screens, relative to `/api/admin`
pub fn routes(api: Arc<dyn CategoryApi>) -> Router {
    Router::new()
        .route("/categories", get(handlers::list_categories))
        .route(
            "/categories/new",
            get(handlers::new_category_form).post(handlers::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::edit_category_form)
                .put(handlers::update_category)
                .delete(handlers::delete_category_from_list),
        )
        .route("/categories/{id}/delete", post(handlers::delete_category))
        .with_state(api)
}
