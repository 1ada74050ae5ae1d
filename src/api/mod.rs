//! Match HTTP API.
//!
//! | Method | Path                          | Handler              |
//! |--------|-------------------------------|----------------------|
//! | GET    | /api/matches                  | list_matches         |
//! | POST   | /api/matches                  | create_match         |
//! | GET    | /api/matches/{id}             | get_match            |
//! | PUT    | /api/matches/{id}             | update_match         |
//! | DELETE | /api/matches/{id}             | delete_match         |
//! | PATCH  | /api/matches/{id}/goals       | register_goal        |
//! | PATCH  | /api/matches/{id}/yellowcards | register_yellow_card |
//! | PATCH  | /api/matches/{id}/redcards    | register_red_card    |
//! | PATCH  | /api/matches/{id}/extratime   | add_extra_time       |
//! | GET    | /api/openapi.json             | openapi_json         |
//! | GET    | /health                       | health               |

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod responses;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::http::server::AppState;
use self::handlers::*;

pub use error::{ApiError, ErrorBody};

/// Routes of the match API, still waiting for their state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/openapi.json", get(openapi::openapi_json))
        .route("/api/matches", get(list_matches).post(create_match))
        .route(
            "/api/matches/{id}",
            get(get_match).put(update_match).delete(delete_match),
        )
        .route("/api/matches/{id}/goals", patch(register_goal))
        .route("/api/matches/{id}/yellowcards", patch(register_yellow_card))
        .route("/api/matches/{id}/redcards", patch(register_red_card))
        .route("/api/matches/{id}/extratime", patch(add_extra_time))
}
