//! HttpMovieStore and ListSyncClient against an in-process json-server stand-in.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use reel::config::ApiConfig;
use reel::movies::{HttpMovieStore, MovieFields, MovieForm, MovieId, MovieStore, StoreError};
use reel::sync::{ListContent, ListSyncClient, LoadStatus};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Db = Arc<Mutex<Vec<Value>>>;

fn id_matches(record: &Value, id: &str) -> bool {
  match &record["id"] {
    Value::Number(n) => n.to_string() == id,
    Value::String(s) => s == id,
    _ => false,
  }
}

async fn list(State(db): State<Db>) -> Json<Vec<Value>> {
  Json(db.lock().unwrap().clone())
}

async fn create(State(db): State<Db>, Json(mut body): Json<Value>) -> (StatusCode, Json<Value>) {
  let mut db = db.lock().unwrap();
  let next_id = db.iter().filter_map(|m| m["id"].as_i64()).max().unwrap_or(0) + 1;
  body["id"] = json!(next_id);
  db.push(body.clone());
  (StatusCode::CREATED, Json(body))
}

async fn update(
  State(db): State<Db>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
  let mut db = db.lock().unwrap();
  let record = db
    .iter_mut()
    .find(|m| id_matches(m, &id))
    .ok_or(StatusCode::NOT_FOUND)?;
  *record = body.clone();
  Ok(Json(body))
}

async fn remove(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
  let mut db = db.lock().unwrap();
  let before = db.len();
  db.retain(|m| !id_matches(m, &id));
  if db.len() == before {
    return Err(StatusCode::NOT_FOUND);
  }
  Ok(Json(json!({})))
}

/// Serve `movies` on an ephemeral port; returns the collection URL
async fn spawn_server(movies: Vec<Value>) -> (String, Db) {
  let db: Db = Arc::new(Mutex::new(movies));
  let app = Router::new()
    .route("/movies", get(list).post(create))
    .route("/movies/:id", axum::routing::put(update).delete(remove))
    .with_state(db.clone());

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });

  (format!("http://{}/movies", addr), db)
}

fn store(url: &str) -> HttpMovieStore {
  HttpMovieStore::new(&ApiConfig {
    url: url.to_string(),
    timeout_ms: 2000,
  })
  .unwrap()
}

fn seed() -> Vec<Value> {
  vec![
    json!({"id": 1, "title": "Dune", "genre": "Sci-Fi", "year": 2021}),
    json!({"id": "b7f2", "title": "Heat", "genre": "Crime", "year": 1995}),
  ]
}

#[tokio::test]
async fn test_list_accepts_numeric_and_string_ids() {
  let (url, _db) = spawn_server(seed()).await;
  let movies = store(&url).list().await.unwrap();

  assert_eq!(movies.len(), 2);
  assert_eq!(movies[0].id, MovieId::Number(1));
  assert_eq!(movies[1].id, MovieId::from("b7f2"));
  assert_eq!(movies[1].label(), "Heat (1995) - Crime");
}

#[tokio::test]
async fn test_create_returns_assigned_id() {
  let (url, db) = spawn_server(seed()).await;
  let created = store(&url)
    .create(&MovieFields {
      title: "Alien".to_string(),
      genre: "Horror".to_string(),
      year: 1979,
    })
    .await
    .unwrap();

  assert_eq!(created.id, MovieId::Number(2));
  assert_eq!(created.title, "Alien");
  assert_eq!(db.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_string_id() {
  let (url, db) = spawn_server(seed()).await;
  let store = store(&url);
  let mut heat = store.list().await.unwrap().remove(1);
  heat.year = 1996;

  let updated = store.update(&heat).await.unwrap();
  assert_eq!(updated, heat);
  assert_eq!(db.lock().unwrap()[1]["year"], json!(1996));
}

#[tokio::test]
async fn test_delete_and_missing_record() {
  let (url, db) = spawn_server(seed()).await;
  let store = store(&url);

  store.delete(&MovieId::Number(1)).await.unwrap();
  assert_eq!(db.lock().unwrap().len(), 1);

  match store.delete(&MovieId::Number(1)).await {
    Err(StoreError::Status { status, .. }) => assert_eq!(status, StatusCode::NOT_FOUND),
    other => panic!("expected 404, got {:?}", other),
  }
}

#[tokio::test]
async fn test_malformed_record_is_decode_error() {
  let (url, _db) = spawn_server(vec![json!({"id": 1, "title": "No year"})]).await;
  let result = store(&url).list().await;
  assert!(matches!(result, Err(StoreError::Decode(_))), "{:?}", result);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
  // Grab a free port, then close it
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let result = store(&format!("http://{}/movies", addr)).list().await;
  assert!(matches!(result, Err(StoreError::Network(_))), "{:?}", result);
}

#[tokio::test]
async fn test_sync_client_round_trip() {
  let (url, db) = spawn_server(seed()).await;
  let mut client = ListSyncClient::new(store(&url));

  client.load().await.unwrap();
  assert_eq!(client.status(), &LoadStatus::Loaded);
  assert_eq!(client.cache().len(), 2);

  client
    .create(&MovieForm::new("Alien", "Horror", " 1979 "))
    .await
    .unwrap();
  assert_eq!(client.cache().len(), 3);
  assert_eq!(client.filter("horror")[0].title, "Alien");

  client
    .update(&MovieId::Number(1), &MovieForm::new("Dune: Part One", "Sci-Fi", "2021"))
    .await
    .unwrap();
  assert_eq!(client.cache()[0].title, "Dune: Part One");

  client.delete(&MovieId::from("b7f2")).await.unwrap();
  assert_eq!(client.cache().len(), 2);
  assert_eq!(db.lock().unwrap().len(), 2);

  // Invalid input never reaches the server
  let err = client
    .create(&MovieForm::new("", "Drama", "2000"))
    .await
    .unwrap_err();
  assert!(err.is_validation());
  assert_eq!(db.lock().unwrap().len(), 2);

  assert_eq!(client.content("western"), ListContent::Empty);
}

#[tokio::test]
async fn test_sync_client_keeps_cache_when_record_is_gone() {
  let (url, db) = spawn_server(seed()).await;
  let mut client = ListSyncClient::new(store(&url));
  client.load().await.unwrap();

  // A record the server no longer has: the update fails and nothing changes
  db.lock().unwrap().retain(|m| m["id"] != json!(1));
  let err = client
    .update(&MovieId::Number(1), &MovieForm::new("Dune", "Sci-Fi", "2021"))
    .await
    .unwrap_err();
  assert!(!err.is_validation());
  assert_eq!(client.cache().len(), 2);
  assert_eq!(client.status(), &LoadStatus::Loaded);
}
