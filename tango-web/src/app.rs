use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tango::{TangoError, TangoResult, TranslationGateway, WordStore};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub gateway: TranslationGateway,
    pub store: Arc<WordStore>,
}

impl AppState {
    pub fn new(gateway: TranslationGateway, store: Arc<WordStore>) -> Self {
        Self { gateway, store }
    }

    /// Run a store operation on the blocking pool
    pub async fn with_store<T, F>(&self, op: F) -> TangoResult<T>
    where
        F: FnOnce(&WordStore) -> TangoResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| TangoError::Task(e.to_string()))?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/translate", post(handlers::translate))
        .route("/save_word", post(handlers::save_word))
        .route("/words", get(handlers::list_words))
        .route("/word_random", get(handlers::random_word))
        .route("/update_known", post(handlers::update_known))
        .route("/delete_word", post(handlers::delete_word))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
