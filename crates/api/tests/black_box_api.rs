use catalog_api::config::AppConfig;
use reqwest::StatusCode;
use serde_json::{Value, json};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory store, ephemeral port.
        let app = catalog_api::app::build_app(&AppConfig::default())
            .await
            .expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn products(&self) -> String {
        format!("{}/api/v1/products", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn smartphone() -> Value {
    json!({
        "name": "Smartphone Galaxy XZ",
        "imageUrl": "https://example.com/x.jpg",
        "description": "High-end smartphone with AMOLED display",
        "price": 899.99,
        "currency": "USD",
        "rating": 4.7,
        "category": "Electronics",
        "brand": "TechNova",
        "specifications": { "screen": "6.5in" }
    })
}

fn named(name: &str, price: f64) -> Value {
    let mut body = smartphone();
    body["name"] = json!(name);
    body["price"] = json!(price);
    body
}

async fn create(client: &reqwest::Client, srv: &TestServer, body: &Value) -> Value {
    let res = client.post(srv.products()).json(body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_returns_envelope_with_every_field() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = create(&client, &srv, &smartphone()).await;

    assert_eq!(body["status"], "success");
    let data = &body["data"];
    assert!(!data["id"].as_str().unwrap().is_empty());
    assert_eq!(data["name"], "Smartphone Galaxy XZ");
    assert_eq!(data["imageUrl"], "https://example.com/x.jpg");
    assert_eq!(data["description"], "High-end smartphone with AMOLED display");
    assert_eq!(data["price"].as_f64(), Some(899.99));
    assert_eq!(data["currency"], "USD");
    assert_eq!(data["rating"].as_f64(), Some(4.7));
    assert_eq!(data["category"], "Electronics");
    assert_eq!(data["brand"], "TechNova");
    assert_eq!(data["specifications"]["screen"], "6.5in");
    assert!(body["metadata"]["timestamp"].is_string());
    assert!(body["metadata"]["correlationId"].is_string());
}

#[tokio::test]
async fn created_product_can_be_fetched_updated_and_deleted() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create(&client, &srv, &smartphone()).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let url = format!("{}/{}", srv.products(), id);

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched["data"], created["data"]);

    let mut update = named("Smartphone Galaxy XZ Pro", 999.0);
    update["id"] = json!("some-other-id");
    update["currency"] = json!("EUR");
    update.as_object_mut().unwrap().remove("rating");
    let res = client.put(&url).json(&update).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["data"]["id"], id.as_str());
    assert_eq!(updated["data"]["name"], "Smartphone Galaxy XZ Pro");
    assert_eq!(updated["data"]["currency"], "EUR");
    assert!(updated["data"].get("rating").is_none());

    let res = client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "product_not_found");
}

#[tokio::test]
async fn high_precision_price_survives_the_round_trip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut body = smartphone();
    body["price"] = serde_json::from_str("12345678901234567.89").unwrap();
    let res = client.post(srv.products()).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let text = res.text().await.unwrap();
    assert!(text.contains(r#""price":12345678901234567.89"#), "{text}");
}

#[tokio::test]
async fn blank_image_url_falls_back_to_placeholder() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut body = smartphone();
    body["imageUrl"] = json!("   ");
    let created = create(&client, &srv, &body).await;
    assert_eq!(created["data"]["imageUrl"], "https://via.placeholder.com/150");
}

#[tokio::test]
async fn invalid_fields_map_to_per_kind_codes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let cases = [
        ("name", json!("ab"), "product_name_invalid"),
        ("price", json!(-100.0), "product_price_invalid"),
        ("imageUrl", json!("http://example.com/x.jpg"), "product_image_url_invalid"),
        ("rating", json!(7.5), "product_rating_invalid"),
        ("category", json!("  "), "product_category_invalid"),
        ("currency", json!("XXY"), "product_price_invalid"),
    ];

    for (field, value, code) in cases {
        let mut body = smartphone();
        body[field] = value;
        let res = client.post(srv.products()).json(&body).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "field {field}");
        let json: Value = res.json().await.unwrap();
        assert_eq!(json["error"]["code"], code, "field {field}");
    }
}

#[tokio::test]
async fn missing_currency_is_a_precondition_failure() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut body = smartphone();
    body.as_object_mut().unwrap().remove("currency");
    let res = client.post(srv.products()).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"]["code"], "precondition_failed");
}

#[tokio::test]
async fn null_body_and_malformed_json_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.post(srv.products()).json(&Value::Null).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"]["code"], "mapping_error");

    let res = client
        .post(srv.products())
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"]["code"], "malformed_request");
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create(&client, &srv, &smartphone()).await;
    let res = client.post(srv.products()).json(&smartphone()).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"]["code"], "product_already_exists");
}

#[tokio::test]
async fn unknown_and_invalid_ids() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/prod123", srv.products()))
        .json(&smartphone())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/prod123", srv.products()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/bad%20id", srv.products()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"]["code"], "product_id_invalid");
}

#[tokio::test]
async fn negative_price_on_update_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut body = smartphone();
    body["price"] = json!(-100.00);
    let res = client
        .put(format!("{}/prod123", srv.products()))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"]["code"], "product_price_invalid");
    assert_eq!(json["error"]["message"], "Price must be non-negative");
}

#[tokio::test]
async fn list_pages_and_sorts() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create(&client, &srv, &named("Cedar Chair", 120.0)).await;
    create(&client, &srv, &named("Aspen Table", 300.0)).await;
    create(&client, &srv, &named("Birch Shelf", 80.0)).await;

    let res = client
        .get(format!("{}?size=2", srv.products()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let page: Value = res.json().await.unwrap();
    let names: Vec<&str> = page["data"]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Aspen Table", "Birch Shelf"]);
    assert_eq!(page["data"]["totalElements"], 3);
    assert_eq!(page["data"]["totalPages"], 2);

    let res = client
        .get(format!("{}?sort=price,desc&page=0&size=10", srv.products()))
        .send()
        .await
        .unwrap();
    let page: Value = res.json().await.unwrap();
    let prices: Vec<f64> = page["data"]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![300.0, 120.0, 80.0]);
}

#[tokio::test]
async fn bad_list_queries_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}?size=0", srv.products()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"]["code"], "invalid_pagination");

    let res = client
        .get(format!("{}?sort=secret", srv.products()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"]["code"], "invalid_sort");
}

#[tokio::test]
async fn correlation_id_is_echoed_or_generated() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.products())
        .header("x-correlation-id", "trace-abc-123")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers().get("x-correlation-id").unwrap(),
        "trace-abc-123"
    );
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["metadata"]["correlationId"], "trace-abc-123");

    let res = client.get(srv.products()).send().await.unwrap();
    let generated = res
        .headers()
        .get("x-correlation-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(!generated.is_empty());
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["metadata"]["correlationId"], generated.as_str());
}
