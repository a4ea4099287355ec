// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/health", get(crate::handlers::health::health_handler))
        .route("/login", post(crate::handlers::auth::login_handler))
        .route("/logout", post(crate::handlers::auth::logout_handler))
        .route("/session", get(crate::handlers::auth::session_handler))

        // Admin: users list + CRUD
        .route("/admin/users", get(crate::handlers::users::state_handler))
        .route("/admin/users/open", post(crate::handlers::users::open_handler))
        .route("/admin/users/scroll", post(crate::handlers::users::scroll_handler))
        .route("/admin/users/search", post(crate::handlers::users::search_handler))
        .route("/admin/users/create", post(crate::handlers::users::create_handler))
        .route(
            "/admin/users/{id}",
            get(crate::handlers::users::get_handler)
                .put(crate::handlers::users::update_handler)
                .delete(crate::handlers::users::delete_handler),
        )

        // Admin: career catalog, price history, CRUD
        .route("/admin/careers", get(crate::handlers::careers::state_handler))
        .route("/admin/careers/open", post(crate::handlers::careers::open_handler))
        .route("/admin/careers/scroll", post(crate::handlers::careers::scroll_handler))
        .route("/admin/careers/search", post(crate::handlers::careers::search_handler))
        .route("/admin/careers/create", post(crate::handlers::careers::create_handler))
        .route("/admin/careers/prices", get(crate::handlers::careers::prices_state_handler))
        .route(
            "/admin/careers/prices/scroll",
            post(crate::handlers::careers::prices_scroll_handler),
        )
        .route(
            "/admin/careers/{id}/prices/open",
            post(crate::handlers::careers::prices_open_handler),
        )
        .route(
            "/admin/careers/{id}",
            get(crate::handlers::careers::get_handler)
                .put(crate::handlers::careers::update_handler)
                .delete(crate::handlers::careers::delete_handler),
        )

        // Admin: payments
        .route("/admin/payments", get(crate::handlers::payments::state_handler))
        .route("/admin/payments/open", post(crate::handlers::payments::open_handler))
        .route("/admin/payments/scroll", post(crate::handlers::payments::scroll_handler))
        .route("/admin/payments/search", post(crate::handlers::payments::search_handler))
        .route("/admin/payments/create", post(crate::handlers::payments::create_handler))
        .route(
            "/admin/payments/by-enrollment",
            post(crate::handlers::payments::by_enrollment_handler),
        )
        .route(
            "/admin/payments/{id}/cancel",
            put(crate::handlers::payments::cancel_handler),
        )

        // Admin: enrollments
        .route("/admin/enrollments", post(crate::handlers::enrollments::create_handler))
        .route(
            "/admin/enrollments/by-user",
            post(crate::handlers::enrollments::by_user_handler),
        )
        .route(
            "/admin/enrollments/{id}",
            axum::routing::delete(crate::handlers::enrollments::delete_handler),
        )

        // News feed, shared by both roles; editing is admin surface
        .route("/news", get(crate::handlers::news::state_handler))
        .route("/news/open", post(crate::handlers::news::open_handler))
        .route("/news/scroll", post(crate::handlers::news::scroll_handler))
        .route("/admin/news/create", post(crate::handlers::news::create_handler))
        .route(
            "/admin/news/{id}",
            get(crate::handlers::news::get_handler)
                .put(crate::handlers::news::update_handler)
                .delete(crate::handlers::news::delete_handler),
        )

        // Student views
        .route("/student/profile", get(crate::handlers::student::profile_handler))
        .route("/student/careers", get(crate::handlers::student::careers_handler))
        .route("/student/payments", get(crate::handlers::student::payments_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
