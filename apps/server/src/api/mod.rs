mod interests;

use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{BatchResponse, InterestRow},
};
use axum::{extract::State, routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(healthz, readyz, interests::calcul_interets, interests::list_interets),
    components(schemas(BatchResponse, InterestRow))
)]
struct ApiDoc;

#[utoipa::path(get, path = "/api/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/api/readyz",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state
        .interest_service
        .check_storage()
        .map_err(|e| ApiError::Unavailable(e.to_string()))?;
    Ok("ok")
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Builds the HTTP surface. There is no request timeout: a batch handed to
/// the writer commits even if its caller goes away.
pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/openapi.json", get(openapi_json))
        .merge(interests::router())
        .with_state(state);

    Router::new().nest("/api", api).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}
