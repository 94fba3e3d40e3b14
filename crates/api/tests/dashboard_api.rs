//! HTTP-level integration tests for the dashboard summary.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get_auth, login_token, post_json_auth};
use sqlx::PgPool;

async fn setup(pool: &PgPool) -> String {
    let (_user, password) = create_test_user(pool, "dash@test.com", "user").await;
    let app = common::build_test_app(pool.clone());
    login_token(app, "dash@test.com", &password).await
}

async fn create_department(pool: &PgPool, token: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": name });
    let response = post_json_auth(app, "/api/v1/departments", token, body).await;
    let json = body_json(response).await;
    json["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_summary(pool: PgPool) {
    let token = setup(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/dashboard/summary", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total_departments"], 0);
    assert_eq!(json["total_risks"], 0);
    // Every canonical level appears even at count zero.
    assert_eq!(json["distribution"].as_array().unwrap().len(), 6);
}

/// Risks stored under different locales land in the same buckets, and the
/// requested locale only changes the display labels.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_summary_is_locale_blind(pool: PgPool) {
    let token = setup(&pool).await;
    let dept = create_department(&pool, &token, "Global").await;

    // Same severity, one assessed in Spanish, one in English.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "department_id": dept,
        "threat_type": "Cyber",
        "description": "Spanish labels",
        "inherent_probability": "Probable (61-80%)",
        "inherent_impact": "Mayor",
    });
    post_json_auth(app, "/api/v1/risks", &token, body).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "department_id": dept,
        "threat_type": "Cyber",
        "description": "English labels",
        "inherent_probability": "Likely (61-80%)",
        "inherent_impact": "Major",
        "locale": "en",
    });
    post_json_auth(app, "/api/v1/risks", &token, body).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/dashboard/summary", &token).await;
    let json = body_json(response).await;

    assert_eq!(json["total_departments"], 1);
    assert_eq!(json["total_risks"], 2);
    assert_eq!(json["high_risks"], 2);

    let high = json["distribution"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["level"] == "high")
        .unwrap();
    assert_eq!(high["count"], 2);
    // Default locale is Spanish.
    assert_eq!(high["label"], "Alto");

    // Requesting English changes labels, never counts.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/dashboard/summary?locale=en", &token).await;
    let json = body_json(response).await;
    let high = json["distribution"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["level"] == "high")
        .unwrap();
    assert_eq!(high["count"], 2);
    assert_eq!(high["label"], "High");
}

/// Mitigated risks count by their residual severity.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_summary_uses_effective_level(pool: PgPool) {
    let token = setup(&pool).await;
    let dept = create_department(&pool, &token, "Mitigation").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "department_id": dept,
        "threat_type": "Cyber",
        "description": "Mitigated",
        "inherent_probability": "Frecuente (81-100%)",
        "inherent_impact": "Catastrófico",
        "residual_probability": "Remoto (0-20%)",
        "residual_impact": "Menor",
    });
    post_json_auth(app, "/api/v1/risks", &token, body).await;

    // A risk with no assessment at all lands in Unclassified.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "department_id": dept,
        "threat_type": "Other",
        "description": "Unassessed",
    });
    post_json_auth(app, "/api/v1/risks", &token, body).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/dashboard/summary", &token).await;
    let json = body_json(response).await;

    assert_eq!(json["high_risks"], 0);
    assert_eq!(json["low_risks"], 1);

    let unclassified = json["distribution"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["level"] == "unclassified")
        .unwrap();
    assert_eq!(unclassified["count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_summary_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/dashboard/summary").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
