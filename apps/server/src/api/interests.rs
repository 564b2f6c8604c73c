use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{BatchResponse, InterestRow, InterestRowsQuery},
};
use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tardi_core::errors::DecodeError;

/// Computes and stores interest for a batch of records.
#[utoipa::path(
    post,
    path = "/api/CalculInterets",
    request_body(
        content = String,
        content_type = "application/json",
        description = "JSON array of {CompteID, Solde, DateDebut, DateFin, Taux}; field names are case-insensitive"
    ),
    responses(
        (status = 200, description = "Batch processed", body = BatchResponse),
        (status = 400, description = "Invalid payload, or the batch could not be stored")
    )
)]
pub async fn calcul_interets(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<BatchResponse>> {
    let payload = std::str::from_utf8(&body).map_err(|_| DecodeError::InvalidEncoding)?;
    let summary = state.interest_service.process_batch(payload).await?;
    Ok(Json(BatchResponse::from(summary)))
}

/// Lists stored interest rows, optionally for one account.
#[utoipa::path(
    get,
    path = "/api/interets",
    params(("compteId" = Option<i32>, Query, description = "Only rows for this account")),
    responses((status = 200, body = [InterestRow]))
)]
pub async fn list_interets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InterestRowsQuery>,
) -> ApiResult<Json<Vec<InterestRow>>> {
    let rows = state.interest_service.get_records(query.compte_id)?;
    Ok(Json(rows.into_iter().map(InterestRow::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/CalculInterets", post(calcul_interets))
        .route("/interets", get(list_interets))
}
