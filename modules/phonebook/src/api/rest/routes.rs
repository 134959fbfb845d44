use axum::{
    routing::get,
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the phonebook routes on `router` and attach the service they share.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let api = Router::new()
        // GET /api/persons - list, POST /api/persons - create or update by name
        .route(
            "/api/persons",
            get(handlers::list_persons).post(handlers::upsert_person),
        )
        // GET/DELETE /api/persons/{id}
        .route(
            "/api/persons/{id}",
            get(handlers::get_person).delete(handlers::delete_person),
        )
        .route("/info", get(handlers::info))
        .layer(Extension(service));

    router.merge(api)
}
