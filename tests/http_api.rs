//! HTTP contract tests: routes, status codes, and error bodies, driven
//! through the router with `oneshot` over the in-memory store.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use ar15_catalog::core::Catalog;
use ar15_catalog::server::{build_router, REGISTRY_VERSION_HEADER};

// ── Helpers ────────────────────────────────────────────────────

async fn send(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn send_raw(app: &axum::Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn app() -> axum::Router {
    build_router(Catalog::in_memory())
}

fn moe_group() -> Value {
    json!({
        "name": "Magpul MOE Grip",
        "description": "Ergonomic polymer pistol grip",
        "components": {
            "specifications": { "brand": "Magpul", "material": "Polymer" }
        },
        "popularityScore": 12
    })
}

fn moe_black() -> Value {
    json!({
        "attributes": { "color": "Black", "materialType": "Polymer" },
        "upc": "873750002996",
        "vendors": [{
            "vendorName": "Brownells",
            "affiliateLink": "https://example.com/brownells/moe",
            "price": 19.95
        }]
    })
}

async fn create_moe(app: &axum::Router) -> String {
    let (status, body) = send(app, Method::POST, "/ar15/grips/groups", Some(moe_group())).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["groupId"].as_str().unwrap().to_string()
}

// ── Health and routing ─────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_uses_error_contract() {
    let (status, body) = send(&app(), Method::GET, "/ar15/stocks/groups", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_enums_per_category() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/ar15/handguards/enums", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["mountingSystems"]
        .as_array()
        .unwrap()
        .contains(&json!("M-LOK")));

    let (_, body) = send(&app, Method::GET, "/ar15/trigger-guards/enums", None).await;
    assert_eq!(body["handOrientations"], json!(["Ambidextrous"]));
}

#[tokio::test]
async fn test_enums_carry_registry_version_header() {
    let request = Request::builder()
        .uri("/ar15/grips/enums")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[REGISTRY_VERSION_HEADER].to_str().unwrap(),
        "1"
    );

    // The body stays a plain map of sets.
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body.get("version").is_none());
    assert!(body["colors"].is_array());
}

// ── Groups ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_and_read_group() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/ar15/grips/groups", Some(moe_group())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "AR-15 grip group added successfully");
    let gid = body["groupId"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/ar15/grips/groups/{}", gid), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["groupId"], gid);
    assert_eq!(body["name"], "Magpul MOE Grip");
    assert_eq!(body["components"]["specifications"]["brand"], "Magpul");

    let (_, list) = send(&app, Method::GET, "/ar15/grips/groups", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Categories are isolated.
    let (_, list) = send(&app, Method::GET, "/ar15/handguards/groups", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_group_missing_name() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/ar15/grips/groups",
        Some(json!({ "description": "no name" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "missing_field");
    assert_eq!(body["error"]["field"], "name");
}

#[tokio::test]
async fn test_duplicate_group_name() {
    let app = app();
    let gid = create_moe(&app).await;
    let (status, body) = send(&app, Method::POST, "/ar15/grips/groups", Some(moe_group())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "duplicate_name");
    assert_eq!(body["error"]["existingId"], gid.as_str());
}

#[tokio::test]
async fn test_group_spec_material_validated() {
    let mut group = moe_group();
    group["components"]["specifications"]["material"] = json!("Cardboard");
    let (status, body) = send(&app(), Method::POST, "/ar15/grips/groups", Some(group)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(
        body["error"]["violations"][0]["field"],
        "components.specifications.material"
    );
}

#[tokio::test]
async fn test_update_group() {
    let app = app();
    let gid = create_moe(&app).await;
    let uri = format!("/ar15/grips/groups/{}", gid);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Magpul MOE+ Grip" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["groupId"], gid.as_str());

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["name"], "Magpul MOE+ Grip");
    assert_eq!(body["popularityScore"], 12.0);
}

#[tokio::test]
async fn test_update_unknown_group() {
    let (status, body) = send(
        &app(),
        Method::PUT,
        "/ar15/grips/groups/nope",
        Some(json!({ "name": "Anything" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["id"], "nope");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (status, body) = send_raw(&app(), Method::POST, "/ar15/grips/groups", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

// ── Variants ───────────────────────────────────────────────────

#[tokio::test]
async fn test_variant_lifecycle() {
    let app = app();
    let gid = create_moe(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/ar15/grips/groups/{}", gid),
        Some(moe_black()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["message"], "AR-15 grip variant added successfully");
    let vid = body["variantId"].as_str().unwrap().to_string();

    let (status, list) = send(
        &app,
        Method::GET,
        &format!("/ar15/grips/groups/{}/variants", gid),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["variantId"], vid.as_str());
    assert_eq!(list[0]["groupId"], gid.as_str());
    assert_eq!(list[0]["upc"], "873750002996");

    let mut change = moe_black();
    change["attributes"]["color"] = json!("FDE");
    change.as_object_mut().unwrap().remove("vendors");
    let uri = format!("/ar15/grips/variants/{}", vid);
    let (status, _) = send(&app, Method::PUT, &uri, Some(change)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, read) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(read["attributes"]["color"], "FDE");
    assert_eq!(read["vendors"][0]["vendorName"], "Brownells");
}

#[tokio::test]
async fn test_variant_in_unknown_group() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/ar15/grips/groups/missing-group",
        Some(moe_black()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "group_not_found");
}

#[tokio::test]
async fn test_duplicate_upc() {
    let app = app();
    let gid = create_moe(&app).await;
    let uri = format!("/ar15/grips/groups/{}", gid);
    let (_, first) = send(&app, Method::POST, &uri, Some(moe_black())).await;

    let (status, body) = send(&app, Method::POST, &uri, Some(moe_black())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "duplicate_upc");
    assert_eq!(body["error"]["existingId"], first["variantId"]);
}

#[tokio::test]
async fn test_variant_missing_upc() {
    let app = app();
    let gid = create_moe(&app).await;
    let mut variant = moe_black();
    variant["upc"] = json!("   ");
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/ar15/grips/groups/{}", gid),
        Some(variant),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "missing_field");
    assert_eq!(body["error"]["field"], "upc");
}

#[tokio::test]
async fn test_variant_registry_violation() {
    let app = app();
    let gid = create_moe(&app).await;
    let mut variant = moe_black();
    variant["attributes"]["color"] = json!("Hot Pink");
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/ar15/grips/groups/{}", gid),
        Some(variant),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    let violation = &body["error"]["violations"][0];
    assert_eq!(violation["field"], "attributes.color");
    assert_eq!(violation["value"], "Hot Pink");
    assert!(violation["allowed"].as_array().unwrap().contains(&json!("Black")));
}

#[tokio::test]
async fn test_unknown_variant() {
    let (status, body) = send(&app(), Method::GET, "/ar15/handguards/variants/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_handguard_compatibility_defaults_orientation() {
    let app = app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/ar15/handguards/groups",
        Some(json!({ "name": "BCM MCMR-13" })),
    )
    .await;
    let gid = body["groupId"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/ar15/handguards/groups/{}", gid),
        Some(json!({
            "attributes": { "length": "13 in", "materialType": "Aluminum" },
            "upc": "812526020556",
            "compatibility": {
                "mountingSystem": { "type": "M-LOK", "slots": 10 },
                "installationType": "Gunsmithing",
                "version": "1.0",
                "lastUpdated": "2025-04-12"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let vid = body["variantId"].as_str().unwrap();

    let (_, read) = send(&app, Method::GET, &format!("/ar15/handguards/variants/{}", vid), None).await;
    assert_eq!(read["compatibility"]["handOrientation"], "Ambidextrous");
    assert_eq!(read["compatibility"]["mountingSystem"]["slots"], 10);
}
