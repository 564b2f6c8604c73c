use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use diesel::RunQueryDsl;
use serde_json::{json, Value};
use tardi_server::{api::app_router, build_state, config::Config};
use tardi_storage_sqlite::{create_pool, get_connection, PoolOptions};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

const REFERENCE_BATCH: &str = r#"[{"CompteID":1,"Solde":1000,"DateDebut":"2024-01-01","DateFin":"2024-07-01","Taux":0.05}]"#;

struct TestApp {
    router: Router,
    db_path: String,
    _tmp: TempDir,
}

async fn build_test_app() -> TestApp {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("interets.db").to_string_lossy().to_string();
    let config = Config::new("127.0.0.1:0".parse().unwrap(), db_path.clone());
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state),
        db_path,
        _tmp: tmp,
    }
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn post_batch(app: &TestApp, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/CalculInterets")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn stored_rows(app: &TestApp, query: &str) -> Vec<Value> {
    let request = Request::builder()
        .uri(format!("/api/interets{}", query))
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).unwrap()
}

fn record(account_id: i32, balance: f64, start: &str, end: &str, rate: f64) -> Value {
    json!({
        "CompteID": account_id,
        "Solde": balance,
        "DateDebut": start,
        "DateFin": end,
        "Taux": rate,
    })
}

#[tokio::test]
async fn reference_batch_is_computed_and_stored() {
    let app = build_test_app().await;

    let (status, body) = post_batch(&app, REFERENCE_BATCH).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Succès : 1 enregistrements traités.");
    assert_eq!(body["received"], 1);
    assert_eq!(body["inserted"], 1);
    assert_eq!(body["skipped"], 0);
    assert_eq!(body["totalInterest"].as_f64(), Some(24.93));

    let rows = stored_rows(&app, "").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["CompteID"], 1);
    assert_eq!(rows[0]["Solde"].as_f64(), Some(1000.0));
    assert_eq!(rows[0]["Taux"].as_f64(), Some(0.05));
    let amount = rows[0]["MontantInteret"].as_f64().unwrap();
    assert!((amount - 1000.0 * 0.05 * (182.0 / 365.0)).abs() < 1e-9);
}

#[tokio::test]
async fn invalid_records_are_skipped_but_counted() {
    let app = build_test_app().await;
    let batch = json!([
        record(1, 1000.0, "2024-01-01", "2024-07-01", 0.05),
        record(2, 1000.0, "2024-07-01", "2024-07-01", 0.05),
        record(3, 250.0, "2024-01-01T00:00:00", "2024-12-31T12:00:00", 0.03),
    ]);

    let (status, body) = post_batch(&app, batch.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Succès : 3 enregistrements traités.");
    assert_eq!(body["received"], 3);
    assert_eq!(body["inserted"], 2);
    assert_eq!(body["skipped"], 1);

    assert_eq!(stored_rows(&app, "").await.len(), 2);
    assert!(stored_rows(&app, "?compteId=2").await.is_empty());
    assert_eq!(stored_rows(&app, "?compteId=3").await.len(), 1);
}

#[tokio::test]
async fn empty_and_unwrapped_payloads_are_bad_requests() {
    let app = build_test_app().await;

    let (status, body) = post_batch(&app, "[]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("no interest records"));

    let single = record(1, 1000.0, "2024-01-01", "2024-07-01", 0.05).to_string();
    let (status, body) = post_batch(&app, single).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("JSON array"));

    let (status, body) = post_batch(&app, "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post_batch(&app, vec![0xff, 0xfe, 0x5b]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(stored_rows(&app, "").await.is_empty());
}

#[tokio::test]
async fn storage_failure_rolls_back_and_hides_details() {
    let app = build_test_app().await;

    // Reject the last record of the batch at the database level.
    let pool = create_pool(&app.db_path, &PoolOptions::default()).unwrap();
    let mut conn = get_connection(&pool).unwrap();
    diesel::sql_query(
        "CREATE TRIGGER reject_account_3 BEFORE INSERT ON Interets \
         WHEN NEW.CompteID = 3 BEGIN SELECT RAISE(ABORT, 'disk on fire'); END;",
    )
    .execute(&mut conn)
    .unwrap();
    drop(conn);

    let batch = json!([
        record(1, 1000.0, "2024-01-01", "2024-07-01", 0.05),
        record(2, 2000.0, "2024-01-01", "2024-07-01", 0.05),
        record(3, 3000.0, "2024-01-01", "2024-07-01", 0.05),
    ]);
    let (status, body) = post_batch(&app, batch.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "internal error" }));
    assert!(stored_rows(&app, "").await.is_empty());
}

#[tokio::test]
async fn large_batch_response_reflects_committed_rows() {
    let app = build_test_app().await;
    let batch: Vec<Value> = (1..=2000)
        .map(|id| record(id, 1000.0, "2024-01-01", "2024-07-01", 0.05))
        .collect();

    let (status, body) = post_batch(&app, Value::Array(batch).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"], 2000);
    assert_eq!(stored_rows(&app, "").await.len(), 2000);
}

#[tokio::test]
async fn unrepresentable_total_is_left_out() {
    let app = build_test_app().await;
    let batch = json!([record(1, 1e40, "2024-01-01", "2025-01-01", 0.05)]);

    let (status, body) = post_batch(&app, batch.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inserted"], 1);
    assert!(body.get("totalInterest").is_none(), "{}", body);
    assert_eq!(stored_rows(&app, "").await.len(), 1);
}

#[tokio::test]
async fn resubmitting_a_batch_stores_it_again() {
    let app = build_test_app().await;

    post_batch(&app, REFERENCE_BATCH).await;
    post_batch(&app, REFERENCE_BATCH).await;

    assert_eq!(stored_rows(&app, "?compteId=1").await.len(), 2);
}

#[tokio::test]
async fn probes_and_request_ids() {
    let app = build_test_app().await;

    for uri in ["/api/healthz", "/api/readyz"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, bytes) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(bytes, b"ok");
    }

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let (status, bytes) = send(
        &app,
        Request::builder()
            .uri("/api/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/api/CalculInterets"]["post"].is_object());
}
