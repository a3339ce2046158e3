//! Axum router construction.
//!
//! Builds the application router with the contact routes, the health probe,
//! the OpenAPI document, and the middleware layers.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::contacts::create_contact,
        routes::contacts::list_contacts,
        routes::contacts::get_contact,
        routes::contacts::delete_contact,
        routes::photos::upload_photo,
        routes::photos::get_photo,
        routes::health::health_check,
    ),
    components(schemas(
        routes::contacts::ContactRequest,
        routes::contacts::ContactResponse,
        routes::contacts::ContactPageResponse,
        routes::photos::UploadPhotoForm,
        routes::health::HealthResponse,
    ))
)]
pub struct ApiDoc;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(ctx.config.photos.max_upload_bytes);

    let contacts = Router::new()
        .route(
            "/contacts",
            get(routes::contacts::list_contacts).post(routes::contacts::create_contact),
        )
        .route("/contacts/photo", put(routes::photos::upload_photo))
        .route("/contacts/image/{filename}", get(routes::photos::get_photo))
        .route(
            "/contacts/{id}",
            get(routes::contacts::get_contact).delete(routes::contacts::delete_contact),
        );

    Router::new()
        .merge(contacts)
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
