//! In-memory `items` service used to exercise the request executor.
//!
//! Every success is a `200` with a JSON body. Writes take
//! `application/x-www-form-urlencoded` bodies. A few extra endpoints expose
//! the behaviours the client has to classify: a header-guarded resource
//! (`401`), a form echo and an arbitrary-status responder.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Value of the `authorization` header accepted by `/secure/items`.
pub const SECRET_TOKEN: &str = "Bearer secret";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct ItemForm {
    pub name: String,
}

#[derive(Debug, Default)]
pub struct Store {
    items: BTreeMap<u64, Item>,
    next_id: u64,
}

impl Store {
    fn seeded(items: Vec<Item>) -> Self {
        let next_id = items.iter().map(|item| item.id).max().unwrap_or(0);
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
            next_id,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router whose store starts with `items`; new ids continue after the
/// largest seeded id.
pub fn app_with(items: Vec<Item>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded(items)));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).put(update_item).delete(delete_item))
        .route("/secure/items", get(list_secure_items))
        .route("/echo/form", post(echo_form).put(echo_form))
        .route("/status/{code}", any(respond_with_status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, items: Vec<Item>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(items)).await
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let store = db.read().await;
    Json(store.items.values().cloned().collect())
}

async fn create_item(State(db): State<Db>, Form(input): Form<ItemForm>) -> Json<Item> {
    let mut store = db.write().await;
    store.next_id += 1;
    let item = Item {
        id: store.next_id,
        name: input.name,
    };
    store.items.insert(item.id, item.clone());
    tracing::debug!(id = item.id, "created item");
    Json(item)
}

async fn get_item(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Item>, StatusCode> {
    let store = db.read().await;
    store.items.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Form(input): Form<ItemForm>,
) -> Result<Json<Item>, StatusCode> {
    let mut store = db.write().await;
    let item = store.items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    item.name = input.name;
    Ok(Json(item.clone()))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Item>, StatusCode> {
    let mut store = db.write().await;
    store.items.remove(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn list_secure_items(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<Item>>, StatusCode> {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(SECRET_TOKEN);
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(list_items(State(db)).await)
}

async fn echo_form(Form(fields): Form<HashMap<String, String>>) -> Json<HashMap<String, String>> {
    Json(fields)
}

async fn respond_with_status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, format!("status {code}")).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}
