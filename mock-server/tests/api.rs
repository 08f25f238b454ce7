use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Item, SECRET_TOKEN};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn form_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn seeded() -> axum::Router {
    app_with(vec![Item {
        id: 1,
        name: "a".to_string(),
    }])
}

// --- list ---

#[tokio::test]
async fn list_items_empty() {
    let resp = app().oneshot(empty_request("GET", "/items")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<Item> = body_json(resp).await;
    assert!(items.is_empty());
}

#[tokio::test]
async fn list_items_seeded() {
    let resp = seeded().oneshot(empty_request("GET", "/items")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], br#"[{"id":1,"name":"a"}]"#);
}

// --- create ---

#[tokio::test]
async fn create_item_returns_200() {
    let resp = app()
        .oneshot(form_request("POST", "/items", "name=Buy+milk"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let item: Item = body_json(resp).await;
    assert_eq!(item.id, 1);
    assert_eq!(item.name, "Buy milk");
}

#[tokio::test]
async fn create_item_after_seed_uses_next_id() {
    let resp = seeded()
        .oneshot(form_request("POST", "/items", "name=b"))
        .await
        .unwrap();

    let item: Item = body_json(resp).await;
    assert_eq!(item.id, 2);
}

#[tokio::test]
async fn create_item_missing_name_returns_422() {
    let resp = app()
        .oneshot(form_request("POST", "/items", "other=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get / update / delete ---

#[tokio::test]
async fn get_item_not_found() {
    let resp = app().oneshot(empty_request("GET", "/items/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_item_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/items/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_item_not_found() {
    let resp = app()
        .oneshot(form_request("PUT", "/items/42", "name=nope"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_item_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/items/42"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- secure ---

#[tokio::test]
async fn secure_items_without_token_returns_401() {
    let resp = seeded()
        .oneshot(empty_request("GET", "/secure/items"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn secure_items_with_wrong_token_returns_401() {
    let req = Request::builder()
        .uri("/secure/items")
        .header(http::header::AUTHORIZATION, "Bearer wrong")
        .body(String::new())
        .unwrap();
    let resp = seeded().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn secure_items_with_token_lists_items() {
    let req = Request::builder()
        .uri("/secure/items")
        .header(http::header::AUTHORIZATION, SECRET_TOKEN)
        .body(String::new())
        .unwrap();
    let resp = seeded().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<Item> = body_json(resp).await;
    assert_eq!(items.len(), 1);
}

// --- echo / status ---

#[tokio::test]
async fn echo_form_returns_fields() {
    let resp = app()
        .oneshot(form_request("PUT", "/echo/form", "a=1&b=two+words"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fields: serde_json::Value = body_json(resp).await;
    assert_eq!(fields, serde_json::json!({"a": "1", "b": "two words"}));
}

#[tokio::test]
async fn status_endpoint_echoes_code() {
    for (method, code) in [("GET", 500), ("POST", 503), ("DELETE", 204), ("PUT", 418)] {
        let resp = app()
            .oneshot(empty_request(method, &format!("/status/{code}")))
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), code, "{method} /status/{code}");
    }
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request("POST", "/items", "name=Walk+dog"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Item = body_json(resp).await;
    let id = created.id;

    // update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request("PUT", &format!("/items/{id}"), "name=Walk+cat"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Item = body_json(resp).await;
    assert_eq!(updated.name, "Walk cat");

    // delete returns the removed item
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/items/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let removed: Item = body_json(resp).await;
    assert_eq!(removed, updated);

    // get after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/items/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
