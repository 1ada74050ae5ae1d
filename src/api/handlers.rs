//! Match resource handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::api::error::ApiError;
use crate::api::responses::{DeletedResponse, ExtraTimeResponse, HealthResponse, MessageResponse};
use crate::http::server::AppState;
use crate::model::{
    extra_time_message, Counter, InputError, Match, MatchId, MatchPayload, EXTRA_TIME_CAP,
};
use crate::observability::metrics;

type ApiResult<T> = Result<T, ApiError>;

/// A numeric id too large for any row is simply not found.
fn parse_id(raw: &str) -> ApiResult<MatchId> {
    match raw.parse::<MatchId>() {
        Ok(id) => Ok(id),
        Err(InputError::IdOutOfRange(_)) => Err(ApiError::NotFound),
        Err(e) => Err(e.into()),
    }
}

pub async fn list_matches(State(state): State<AppState>) -> ApiResult<Json<Vec<Match>>> {
    let matches = state.store.list().await?;
    Ok(Json(matches))
}

pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Match>> {
    let id = parse_id(&id)?;
    state.store.get(id).await?.map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_match(
    State(state): State<AppState>,
    payload: Result<Json<MatchPayload>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let fields = payload.validate()?;

    let created = state.store.insert(fields).await?;
    metrics::record_created();
    tracing::info!(match_id = %created.id, home = %created.home_team, away = %created.away_team, "Match created");

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MatchPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let fields = payload.validate()?;

    match state.store.update(id, fields).await? {
        Some(_) => {
            tracing::info!(match_id = %id, "Match updated");
            Ok(Json(MessageResponse::new("Match updated")))
        }
        None => Err(ApiError::NotFound),
    }
}

pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let id = parse_id(&id)?;
    let deleted = state.store.delete(id).await?.ok_or(ApiError::NotFound)?;

    metrics::record_deleted();
    tracing::info!(match_id = %id, "Match deleted");

    Ok(Json(DeletedResponse {
        message: "Match deleted".to_string(),
        deleted,
    }))
}

async fn increment(state: AppState, raw_id: &str, counter: Counter) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(raw_id)?;
    if !state.store.increment(id, counter).await? {
        return Err(ApiError::NotFound);
    }

    metrics::record_increment(counter.as_str());
    tracing::debug!(match_id = %id, counter = %counter, "Counter incremented");
    Ok(Json(MessageResponse::new(counter.confirmation())))
}

pub async fn register_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    increment(state, &id, Counter::Goals).await
}

pub async fn register_yellow_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    increment(state, &id, Counter::YellowCards).await
}

pub async fn register_red_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    increment(state, &id, Counter::RedCards).await
}

pub async fn add_extra_time(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ExtraTimeResponse>> {
    let id = parse_id(&id)?;
    let extra_time = state
        .store
        .bump_extra_time(id, EXTRA_TIME_CAP)
        .await?
        .ok_or(ApiError::NotFound)?;

    metrics::record_increment("extra_time");
    tracing::debug!(match_id = %id, extra_time, "Extra time incremented");

    Ok(Json(ExtraTimeResponse {
        message: extra_time_message(extra_time),
        extra_time,
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.kind().as_str();
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ok", store })),
        Err(e) => {
            tracing::warn!(error = %e, store, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { status: "unavailable", store }),
            )
        }
    }
}
