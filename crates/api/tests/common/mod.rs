#![allow(dead_code)]

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use survey_api::config::{ServerConfig, TallyStrategy};
use survey_api::router::build_app_router;
use survey_api::state::AppState;
use survey_core::survey::SurveyResponse;
use survey_db::{StoreConfig, StoreError, SurveyStore};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
///
/// Points `content_dir` at the repository's bundled markdown files.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        content_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("../../content"),
        tally_strategy: TallyStrategy::Client,
        store: StoreConfig {
            user: "survey".to_string(),
            password: "secret".to_string(),
            account: "localhost".to_string(),
            warehouse: String::new(),
            database: "survey_test".to_string(),
            schema: "public".to_string(),
        },
    }
}

/// Build the full application router over the given store, using the same
/// middleware stack as production.
pub fn build_test_app(store: Arc<dyn SurveyStore>) -> Router {
    build_test_app_with(store, test_config())
}

pub fn build_test_app_with(store: Arc<dyn SurveyStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an arbitrary body, for requests that are not valid JSON.
pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Store doubles
// ---------------------------------------------------------------------------

/// Call counters shared by the store doubles.
#[derive(Debug, Default)]
pub struct Calls {
    pub ensure_table: AtomicUsize,
    pub insert: AtomicUsize,
    pub fetch_slots: AtomicUsize,
    pub count_by_slot: AtomicUsize,
}

impl Calls {
    pub fn reads(&self) -> usize {
        self.fetch_slots.load(Ordering::SeqCst) + self.count_by_slot.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.insert.load(Ordering::SeqCst)
    }
}

/// In-memory table store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub rows: Mutex<Vec<SurveyResponse>>,
    pub calls: Calls,
}

impl MemoryStore {
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl SurveyStore for MemoryStore {
    async fn ensure_table(&self) -> Result<(), StoreError> {
        self.calls.ensure_table.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn insert(&self, response: &SurveyResponse) -> Result<(), StoreError> {
        self.calls.insert.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().unwrap().push(response.clone());
        Ok(())
    }

    async fn fetch_slots(&self) -> Result<Vec<String>, StoreError> {
        self.calls.fetch_slots.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.workshop_proposed_time.label().to_string())
            .collect())
    }

    async fn count_by_slot(&self) -> Result<Vec<(String, i64)>, StoreError> {
        self.calls.count_by_slot.fetch_add(1, Ordering::SeqCst);
        let mut counts: Vec<(String, i64)> = Vec::new();
        for row in self.rows.lock().unwrap().iter() {
            let label = row.workshop_proposed_time.label();
            match counts.iter_mut().find(|(slot, _)| slot == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label.to_string(), 1)),
            }
        }
        // Same ordering as the database query: votes desc, then label.
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(counts)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Which operations a [`FailingStore`] rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    /// Every operation, as if the server were down.
    Everything,
    /// Only reads; writes go through to the inner memory store.
    Reads,
}

/// Store double that refuses connections.
#[derive(Debug)]
pub struct FailingStore {
    pub fail_at: FailAt,
    pub inner: MemoryStore,
}

impl FailingStore {
    pub fn new(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            inner: MemoryStore::default(),
        }
    }

    fn refused() -> StoreError {
        StoreError::Connect(sqlx::Error::Io(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }
}

#[async_trait]
impl SurveyStore for FailingStore {
    async fn ensure_table(&self) -> Result<(), StoreError> {
        self.inner.calls.ensure_table.fetch_add(1, Ordering::SeqCst);
        match self.fail_at {
            FailAt::Everything => Err(Self::refused()),
            FailAt::Reads => Ok(()),
        }
    }

    async fn insert(&self, response: &SurveyResponse) -> Result<(), StoreError> {
        match self.fail_at {
            FailAt::Everything => {
                self.inner.calls.insert.fetch_add(1, Ordering::SeqCst);
                Err(Self::refused())
            }
            FailAt::Reads => self.inner.insert(response).await,
        }
    }

    async fn fetch_slots(&self) -> Result<Vec<String>, StoreError> {
        self.inner.calls.fetch_slots.fetch_add(1, Ordering::SeqCst);
        Err(Self::refused())
    }

    async fn count_by_slot(&self) -> Result<Vec<(String, i64)>, StoreError> {
        self.inner.calls.count_by_slot.fetch_add(1, Ordering::SeqCst);
        Err(Self::refused())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(Self::refused())
    }
}
