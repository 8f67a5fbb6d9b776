//! End-to-end tests over a real socket.

use customer_sdk::CustomerClient;
use reqwest::{header, StatusCode};

mod common;

#[tokio::test]
async fn test_customer_and_order_round_trip() {
    let server = common::start_server(common::test_config()).await;
    let client = CustomerClient::new(&server.url());

    let created = client.create_customer("Ana", 30).await.unwrap();
    let customer = created.value;
    assert!(!customer.id.is_empty());
    assert_eq!(customer.name, "Ana");
    assert_eq!(customer.age, 30);
    assert!(!customer.disabled);
    assert_eq!(created.location.as_deref(), Some(format!("/customers/{}", customer.id).as_str()));

    let order = client
        .create_order(&customer.id, "Book", 9.99, 1)
        .await
        .unwrap()
        .value;
    assert_eq!(order.status, "PENDING");
    assert_eq!(order.product, "Book");
    assert_eq!(order.price, 9.99);
    assert_eq!(order.amount, 1);

    let fetched = client.get_order(&customer.id, &order.id).await.unwrap();
    assert_eq!(fetched, order);

    let orders = client.list_orders(&customer.id).await.unwrap();
    assert_eq!(orders, vec![order.clone()]);

    // Under a customer that does not exist: customer-absent, not order-absent.
    let err = client.get_order("no-such-customer", &order.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    assert!(err.to_string().contains("customer not found"));

    let err = client.get_order(&customer.id, "no-such-order").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(err.to_string().contains("order not found"));
}

#[tokio::test]
async fn test_customer_json_has_no_orders_field() {
    let server = common::start_server(common::test_config()).await;
    let client = common::http_client();

    let res = client
        .post(format!("{}/customers/", server.url()))
        .json(&serde_json::json!({"name": "Ana", "age": 30}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res.headers()[header::LOCATION].to_str().unwrap().to_string();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.get("orders").is_none());
    assert_eq!(location, format!("/customers/{}", body["id"].as_str().unwrap()));
}

#[tokio::test]
async fn test_routing_failures() {
    let server = common::start_server(common::test_config()).await;
    let client = common::http_client();

    let res = client.get(format!("{}/nowhere", server.url())).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(format!("{}/customers/42", server.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[header::ALLOW], "GET");
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "405 method not allowed");
}

#[tokio::test]
async fn test_missing_customer_on_order_creation() {
    let server = common::start_server(common::test_config()).await;
    let client = CustomerClient::new(&server.url());

    let err = client
        .create_order("ghost", "Book", 9.99, 1)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));

    let err = client.get_customer("ghost").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(client.list_customers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_body_decoding_is_enforced() {
    let server = common::start_server(common::test_config()).await;
    let client = common::http_client();
    let url = format!("{}/customers", server.url());

    let res = client
        .post(&url)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(r#"{"name":"Ana","age":30}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        "need content-type 'application/json', but was 'text/plain'"
    );

    let res = client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(r#"{"name":"Ana","age":"thirty"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.get(&url).send().await.unwrap();
    let customers: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(customers.is_empty());
}
