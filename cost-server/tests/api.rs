use axum::Router;
use axum::body::Body;
use cost_engine::RateTables;
use cost_server::{Config, ServerState, build_app};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_config() -> Config {
    let mut config = Config::from_env();
    config.rate_tables_path = None;
    config.default_usd_to_cny = 7.2;
    config.default_cny_to_brl = 0.78;
    config.request_timeout_ms = 10_000;
    config.max_body_bytes = 64 * 1024;
    config
}

fn app() -> Router {
    build_app(ServerState::new(test_config(), RateTables::builtin()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, http::HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

async fn post(path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _, body) = send(app(), request).await;
    (status, body)
}

async fn get(path: &str) -> (StatusCode, Value) {
    let request = Request::get(path).body(Body::empty()).unwrap();
    let (status, _, body) = send(app(), request).await;
    (status, body)
}

fn shipment() -> Value {
    json!({
        "productPriceCny": 120,
        "weightGrams": 800,
        "lengthCm": 30,
        "widthCm": 20,
        "heightCm": 10,
        "shippingLineId": "jd-standard",
        "serviceFeeRate": 0.05,
        "includeInsurance": true,
        "exchangeRates": { "usdToCny": 7.2, "cnyToBrl": 0.78 }
    })
}

// ========== Health and catalog ==========

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["lines"], 4);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (_, headers, _) = send(app(), request).await;
    let id = headers.get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_shipping_lines_catalog() {
    let (status, body) = get("/api/shipping-lines").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["result"]["lines"].as_array().unwrap().len(), 4);
    assert_eq!(body["result"]["serviceTiers"][0]["name"], "Sem nível");
    assert_eq!(body["result"]["insurance"]["maxInsuredValueCny"], 3000.0);
}

#[tokio::test]
async fn test_routes_catalog() {
    let (status, body) = get("/api/routes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["routes"][0]["id"], "ems");
    assert_eq!(body["result"]["routes"][1]["pricingType"], "pure-weight");
    assert_eq!(body["result"]["vipTiers"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_unknown_path_uses_envelope() {
    let (status, body) = get("/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 3);
}

// ========== Calculate cost ==========

#[tokio::test]
async fn test_calculate_cost() {
    let (status, body) = post("/api/calculate-cost", shipment()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body.get("error").is_none());

    let result = &body["result"];
    assert_eq!(result["weight"]["chargeableWeight"], 800.0);
    assert_eq!(result["weight"]["unit"], "grams");
    assert_eq!(result["cny"]["freight"], 100.8);
    assert_eq!(result["cny"]["total"], 238.46);
    assert_eq!(result["brl"]["total"], 186.0);
    assert_eq!(result["metadata"]["shippingLineId"], "jd-standard");
    assert_eq!(result["metadata"]["delivery"]["minDays"], 12);
}

#[tokio::test]
async fn test_calculate_cost_defaults_rates_and_tier() {
    let mut body = shipment();
    let obj = body.as_object_mut().unwrap();
    obj.remove("exchangeRates");
    obj.remove("serviceFeeRate");
    obj.insert("serviceTierId".into(), json!("vip"));

    let (status, body) = post("/api/calculate-cost", body).await;
    assert_eq!(status, StatusCode::OK);
    let metadata = &body["result"]["metadata"];
    assert_eq!(metadata["exchangeRates"]["usdToCny"], 7.2);
    assert_eq!(metadata["exchangeRates"]["cnyToBrl"], 0.78);
    assert_eq!(metadata["serviceFeeRate"], 0.03);
}

#[tokio::test]
async fn test_calculate_cost_unknown_tier() {
    let mut body = shipment();
    let obj = body.as_object_mut().unwrap();
    obj.remove("serviceFeeRate");
    obj.insert("serviceTierId".into(), json!("platinum-plus"));

    let (status, body) = post("/api/calculate-cost", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 3003);
}

#[tokio::test]
async fn test_calculate_cost_without_rate_or_tier_uses_base_tier() {
    let mut body = shipment();
    body.as_object_mut().unwrap().remove("serviceFeeRate");

    let (status, body) = post("/api/calculate-cost", body).await;
    assert_eq!(status, StatusCode::OK);
    // "Sem nível" is the undiscounted base rate
    assert_eq!(body["result"]["metadata"]["serviceFeeRate"], 0.05);
}

#[tokio::test]
async fn test_oversized_box_answers_in_envelope() {
    let mut body = shipment();
    body["lengthCm"] = json!(1e10);
    body["widthCm"] = json!(1e10);
    body["heightCm"] = json!(1e10);

    let (status, body) = post("/api/calculate-cost", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 8);
    assert_eq!(body["error"]["details"]["field"], "lengthCm");
}

#[tokio::test]
async fn test_incompatible_line_lists_conflicts() {
    let mut body = shipment();
    body["productAttributeIds"] = json!(["battery", "liquid"]);

    let (status, body) = post("/api/calculate-cost", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body.get("result").is_none());
    assert_eq!(body["error"]["code"], 2003);
    let conflicts = body["error"]["details"]["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0]["name"], "Battery");
}

#[tokio::test]
async fn test_unknown_line_is_404() {
    let mut body = shipment();
    body["shippingLineId"] = json!("fedex");
    let (status, body) = post("/api/calculate-cost", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2002);
}

#[tokio::test]
async fn test_zero_dimension_is_400() {
    let mut body = shipment();
    body["heightCm"] = json!(0);
    let (status, body) = post("/api/calculate-cost", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
    assert_eq!(body["error"]["details"]["field"], "heightCm");
}

#[tokio::test]
async fn test_weight_over_line_limit_is_422() {
    let mut body = shipment();
    body["shippingLineId"] = json!("jd-economy");
    body["weightGrams"] = json!(12_000);
    let (status, body) = post("/api/calculate-cost", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 1002);
    assert_eq!(body["error"]["details"]["unit"], "g");
}

#[tokio::test]
async fn test_malformed_json_is_invalid_request() {
    let request = Request::post("/api/calculate-cost")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ \"productPriceCny\": "))
        .unwrap();
    let (status, _, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 5);
}

#[tokio::test]
async fn test_missing_field_is_invalid_request() {
    let mut body = shipment();
    body.as_object_mut().unwrap().remove("weightGrams");
    let (status, body) = post("/api/calculate-cost", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 5);
}

#[tokio::test]
async fn test_compare_lines() {
    let mut body = shipment();
    body.as_object_mut().unwrap().remove("shippingLineId");
    body["productAttributeIds"] = json!(["battery"]);

    let (status, body) = post("/api/calculate-cost/compare", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["eligibleLineIds"], json!(["jd-sensitive"]));

    let quotes = body["result"]["quotes"].as_array().unwrap();
    assert_eq!(quotes.len(), 4);
    let standard = quotes.iter().find(|q| q["lineId"] == "jd-standard").unwrap();
    assert_eq!(standard["error"]["code"], 2003);
    assert_eq!(standard["conflicts"][0]["id"], "battery");
    let sensitive = quotes.iter().find(|q| q["lineId"] == "jd-sensitive").unwrap();
    assert!(sensitive.get("error").is_none());
    assert!(sensitive["result"]["cny"]["total"].as_f64().unwrap() > 0.0);
}

// ========== Import tax ==========

#[tokio::test]
async fn test_import_tax() {
    let (status, body) = post(
        "/api/import-tax",
        json!({
            "productPriceCny": 500,
            "shippingCny": 50,
            "exchangeRateCnyToBrl": 0.8,
            "productValueUsd": 80,
            "isRemessaConforme": false
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_eq!(result["subtotal"], 440.0);
    assert_eq!(result["iof"], 1.67);
    assert_eq!(result["importDuty"], 264.0);
    assert_eq!(result["icms"], 119.68);
    assert_eq!(result["total"], 825.35);
    assert_eq!(result["taxRegime"], "standard");
}

#[tokio::test]
async fn test_import_tax_negative_price() {
    let (status, body) = post(
        "/api/import-tax",
        json!({
            "productPriceCny": -1,
            "shippingCny": 50,
            "productValueUsd": 80
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 3001);
    assert_eq!(body["error"]["details"]["field"], "productPriceCny");
}

#[tokio::test]
async fn test_import_tax_huge_declared_value_rejected() {
    let (status, body) = post(
        "/api/import-tax",
        json!({
            "productPriceCny": 500,
            "shippingCny": 50,
            "productValueUsd": 1e30,
            "isRemessaConforme": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 8);
    assert_eq!(body["error"]["details"]["field"], "productValueUsd");
}

// ========== Legacy freight ==========

#[tokio::test]
async fn test_legacy_freight() {
    let (status, body) = post(
        "/api/legacy-freight",
        json!({
            "productPriceCny": 200,
            "weightKg": 1.2,
            "lengthCm": 40,
            "widthCm": 30,
            "heightCm": 20,
            "routeId": "ems",
            "cnyToBrl": 0.8
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_eq!(result["weight"]["chargeableWeight"], 3.0);
    assert_eq!(result["cny"]["freight"], 430.0);
    assert_eq!(result["cny"]["total"], 667.8);
    assert_eq!(result["brl"]["total"], 534.24);
}

#[tokio::test]
async fn test_legacy_freight_requires_route() {
    let (status, body) = post(
        "/api/legacy-freight",
        json!({ "productPriceCny": 200, "weightKg": 1.2 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 2);
}

#[tokio::test]
async fn test_legacy_freight_invalid_vip() {
    let (status, body) = post(
        "/api/legacy-freight",
        json!({ "productPriceCny": 200, "weightKg": 1.2, "routeId": "sal", "vipLevel": 9 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 3004);
}

#[tokio::test]
async fn test_legacy_freight_huge_weight_rejected() {
    let (status, body) = post(
        "/api/legacy-freight",
        json!({ "productPriceCny": 200, "weightKg": 1e20, "routeId": "ems" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 8);
    assert_eq!(body["error"]["details"]["field"], "weightKg");
}

#[tokio::test]
async fn test_legacy_compare_degrades_per_route() {
    let (status, body) = post(
        "/api/legacy-freight/compare",
        json!({ "productPriceCny": 200, "weightKg": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let quotes = body["result"].as_array().unwrap();
    assert_eq!(quotes.len(), 5);
    let fj = quotes.iter().find(|q| q["routeId"] == "fj-br-exp").unwrap();
    assert_eq!(fj["error"]["code"], 1002);
    let dhl = quotes.iter().find(|q| q["routeId"] == "dhl").unwrap();
    assert!(dhl["result"]["cny"]["total"].as_f64().unwrap() > 0.0);
}
