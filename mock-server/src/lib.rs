use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub id: i64,
    pub machine_id: String,
    pub lot_id: String,
    pub product_id: String,
    pub recipe_id: String,
    pub bar_count: Option<i64>,
    pub time_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// Create and full-replacement payload. Any `id` in the body is ignored.
#[derive(Deserialize)]
pub struct BarInput {
    pub machine_id: String,
    pub lot_id: String,
    pub product_id: String,
    pub recipe_id: String,
    #[serde(default)]
    pub bar_count: Option<i64>,
    #[serde(default)]
    pub time_duration: Option<f64>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl BarInput {
    fn into_bar(self, id: i64) -> Bar {
        Bar {
            id,
            machine_id: self.machine_id,
            lot_id: self.lot_id,
            product_id: self.product_id,
            recipe_id: self.recipe_id,
            bar_count: self.bar_count,
            time_duration: self.time_duration,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    bars: BTreeMap<i64, Bar>,
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Bar not found" })))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/bars", get(list_bars).post(create_bar))
        .route("/bars/{id}", get(get_bar).put(update_bar).delete(delete_bar))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_bars(State(db): State<Db>) -> Json<Vec<Bar>> {
    let store = db.read().await;
    Json(store.bars.values().cloned().collect())
}

async fn create_bar(State(db): State<Db>, Json(input): Json<BarInput>) -> (StatusCode, Json<Bar>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let bar = input.into_bar(store.next_id);
    store.bars.insert(bar.id, bar.clone());
    tracing::debug!(id = bar.id, "bar created");
    (StatusCode::CREATED, Json(bar))
}

async fn get_bar(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Bar>> {
    let store = db.read().await;
    store.bars.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_bar(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<BarInput>,
) -> ApiResult<Json<Bar>> {
    let mut store = db.write().await;
    let bar = store.bars.get_mut(&id).ok_or_else(not_found)?;
    *bar = input.into_bar(id);
    Ok(Json(bar.clone()))
}

async fn delete_bar(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let mut store = db.write().await;
    store.bars.remove(&id).ok_or_else(not_found)?;
    tracing::debug!(id, "bar deleted");
    Ok(Json(json!({ "message": "Bar deleted successfully" })))
}
