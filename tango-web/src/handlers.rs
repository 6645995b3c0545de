use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tango::{NewWord, TangoError, TangoResult, Translation, WordEntry};
use tracing::{error, info};

use crate::app::AppState;
use crate::error::{ApiError, rejection_error};

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveWordRequest {
    pub source_text: Option<String>,
    pub translated_text: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveWordResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct RandomWordResponse {
    pub id: i64,
    pub source_text: String,
    pub translated_text: String,
    pub known: bool,
}

impl From<WordEntry> for RandomWordResponse {
    fn from(word: WordEntry) -> Self {
        Self {
            id: word.id,
            source_text: word.source_text,
            translated_text: word.translated_text,
            known: word.known,
        }
    }
}

/// The learning flag as sent by clients: `true`/`false` or `1`/`0`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum KnownFlag {
    Bool(bool),
    Int(i64),
}

impl KnownFlag {
    fn to_bool(self) -> TangoResult<bool> {
        match self {
            KnownFlag::Bool(b) => Ok(b),
            KnownFlag::Int(0) => Ok(false),
            KnownFlag::Int(1) => Ok(true),
            KnownFlag::Int(n) => Err(TangoError::Validation(format!(
                "known must be true, false, 0 or 1 (got {})",
                n
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateKnownRequest {
    pub id: Option<i64>,
    pub known: Option<KnownFlag>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteWordRequest {
    pub id: Option<i64>,
}

fn required_id(id: Option<i64>) -> TangoResult<i64> {
    id.ok_or_else(|| TangoError::Validation("id is required".to_string()))
}

pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<Translation>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::plain(rejection_error(e)))?;

    let text = request
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::plain(TangoError::Validation("text is required".to_string())))?;

    let translation = state
        .gateway
        .translate(&text, request.source.as_deref(), request.target.as_deref())
        .await
        .map_err(ApiError::plain)?;

    Ok(Json(translation))
}

pub async fn save_word(
    State(state): State<AppState>,
    payload: Result<Json<SaveWordRequest>, JsonRejection>,
) -> Result<Json<SaveWordResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::status(rejection_error(e)))?;

    let word = NewWord {
        source_text: request.source_text.unwrap_or_default(),
        translated_text: request.translated_text.unwrap_or_default(),
        source_lang: request.source_lang.unwrap_or_default(),
        target_lang: request.target_lang.unwrap_or_default(),
    };

    let id = state
        .with_store(move |store| store.create(&word))
        .await
        .map_err(ApiError::status)?;

    info!(id, "word saved");
    Ok(Json(SaveWordResponse {
        status: "success",
        message: "Word saved",
        id,
    }))
}

pub async fn list_words(State(state): State<AppState>) -> Result<Json<Vec<WordEntry>>, ApiError> {
    let words = state
        .with_store(|store| store.list_all())
        .await
        .map_err(ApiError::plain)?;
    Ok(Json(words))
}

pub async fn random_word(
    State(state): State<AppState>,
) -> Result<Json<RandomWordResponse>, ApiError> {
    let word = state
        .with_store(|store| store.pick_weighted())
        .await
        .map_err(ApiError::plain)?;
    Ok(Json(word.into()))
}

pub async fn update_known(
    State(state): State<AppState>,
    payload: Result<Json<UpdateKnownRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::status(rejection_error(e)))?;

    let id = required_id(request.id).map_err(ApiError::status)?;
    let known = request
        .known
        .ok_or_else(|| TangoError::Validation("known is required".to_string()))
        .and_then(KnownFlag::to_bool)
        .map_err(ApiError::status)?;

    // A missing id updates nothing and still reports success
    state
        .with_store(move |store| store.update_known(id, known))
        .await
        .map_err(ApiError::status)?;

    Ok(Json(json!({ "status": "success" })))
}

pub async fn delete_word(
    State(state): State<AppState>,
    payload: Result<Json<DeleteWordRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::status(rejection_error(e)))?;
    let id = required_id(request.id).map_err(ApiError::status)?;

    // Storage failures are logged; the client is told the word is gone either way
    if let Err(e) = state.with_store(move |store| store.delete(id)).await {
        error!(id, error = %e, "failed to delete word");
    }

    Ok(Json(json!({ "success": true, "message": "Deleted successfully" })))
}
