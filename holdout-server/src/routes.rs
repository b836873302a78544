//! HTTP surface: routing, request/response DTOs, and CORS.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use holdout_game::{ActionTag, Ending, SceneCatalog, SurvivorState, Vitals};

use crate::error::ApiError;
use crate::service::{ActionOutcome, SessionService, StartOutcome};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SessionService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/start", post(start))
        .route("/api/action", post(action))
        .route("/api/quit", post(quit))
        .route("/api/scenes", get(scenes))
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct StartRequest {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ActionRequest {
    name: String,
    action: String,
}

#[derive(Debug, Deserialize)]
struct QuitRequest {
    name: String,
}

/// Terminal snapshot returned when an already-finished survivor starts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FinishedSnapshot {
    is_finished: bool,
    final_status: Ending,
    epilogue: &'static str,
    stats: Vitals,
}

/// Envelope for the turn that ends a session. The flattened state already
/// carries `finished` and `finalStatus`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GameOverResponse {
    game_over: bool,
    is_finished: bool,
    epilogue: &'static str,
    #[serde(flatten)]
    state: SurvivorState,
}

#[derive(Debug, Serialize)]
struct QuitResponse {
    success: bool,
    message: String,
}

async fn start(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Response, ApiError> {
    match state.service.start_or_resume(&request.name).await? {
        StartOutcome::Finished(survivor) => {
            let Some(status) = survivor.final_status else {
                return Err(ApiError::internal("finished record carries no status"));
            };
            Ok(Json(FinishedSnapshot {
                is_finished: true,
                final_status: status,
                epilogue: status.epilogue(),
                stats: survivor.vitals(),
            })
            .into_response())
        }
        StartOutcome::Created(survivor) | StartOutcome::Resumed(survivor) => {
            Ok(Json(survivor).into_response())
        }
    }
}

async fn action(
    State(state): State<AppState>,
    Json(request): Json<ActionRequest>,
) -> Result<Response, ApiError> {
    let tag = ActionTag::parse(&request.action);
    let ActionOutcome { state: survivor, .. } =
        state.service.apply_action(&request.name, tag).await?;

    if survivor.finished {
        let Some(status) = survivor.final_status else {
            return Err(ApiError::internal("finished record carries no status"));
        };
        return Ok(Json(GameOverResponse {
            game_over: true,
            is_finished: true,
            epilogue: status.epilogue(),
            state: survivor,
        })
        .into_response());
    }
    Ok(Json(survivor).into_response())
}

async fn quit(
    State(state): State<AppState>,
    Json(request): Json<QuitRequest>,
) -> Result<Json<QuitResponse>, ApiError> {
    let existed = state.service.terminate(&request.name).await?;
    let message = if existed {
        format!("Data for {} deleted.", request.name)
    } else {
        format!("No data found for {}.", request.name)
    };
    Ok(Json(QuitResponse {
        success: existed,
        message,
    }))
}

async fn scenes(State(state): State<AppState>) -> Json<SceneCatalog> {
    Json(state.service.catalog().clone())
}

async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut axum::http::HeaderMap) {
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static("content-type"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdout_game::MemoryStore;

    fn app_state() -> AppState {
        let service = SessionService::new(
            Arc::new(MemoryStore::new()),
            SceneCatalog::default_catalog().clone(),
            1337,
        );
        AppState {
            service: Arc::new(service),
        }
    }

    #[tokio::test]
    async fn start_returns_the_fresh_record() {
        let state = app_state();
        let response = start(
            State(state),
            Json(StartRequest {
                name: String::from("alice"),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn action_on_unknown_name_maps_to_404() {
        let state = app_state();
        let err = action(
            State(state),
            Json(ActionRequest {
                name: String::from("ghost"),
                action: String::from("search"),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Player not found");
    }

    #[tokio::test]
    async fn quit_reports_whether_data_existed() {
        let state = app_state();
        let Json(missing) = quit(
            State(state.clone()),
            Json(QuitRequest {
                name: String::from("bob"),
            }),
        )
        .await
        .unwrap();
        assert!(!missing.success);
        assert!(missing.message.contains("No data"));

        start(
            State(state.clone()),
            Json(StartRequest {
                name: String::from("bob"),
            }),
        )
        .await
        .unwrap();
        let Json(deleted) = quit(
            State(state),
            Json(QuitRequest {
                name: String::from("bob"),
            }),
        )
        .await
        .unwrap();
        assert!(deleted.success);
        assert!(deleted.message.contains("deleted"));
    }

    #[tokio::test]
    async fn scene_catalog_is_served_whole() {
        let state = app_state();
        let Json(catalog) = scenes(State(state)).await;
        assert_eq!(catalog.last_day(), 6);
    }

    #[test]
    fn game_over_envelope_flattens_the_state() {
        let mut survivor = SurvivorState::new("alice");
        survivor.day = 7;
        survivor.finish(Ending::SanctuaryBarely);
        let value = serde_json::to_value(GameOverResponse {
            game_over: true,
            is_finished: true,
            epilogue: Ending::SanctuaryBarely.epilogue(),
            state: survivor,
        })
        .unwrap();

        assert_eq!(value["gameOver"], true);
        assert_eq!(value["isFinished"], true);
        assert_eq!(value["finalStatus"], "sanctuary_barely");
        assert_eq!(value["name"], "alice");
        assert_eq!(value["day"], 7);
    }

    #[test]
    fn finished_snapshot_exposes_vitals_only() {
        let mut survivor = SurvivorState::new("alice");
        survivor.finish(Ending::Died);
        let value = serde_json::to_value(FinishedSnapshot {
            is_finished: true,
            final_status: Ending::Died,
            epilogue: Ending::Died.epilogue(),
            stats: survivor.vitals(),
        })
        .unwrap();

        assert_eq!(value["isFinished"], true);
        assert_eq!(value["finalStatus"], "died");
        assert_eq!(value["stats"]["health"], 100);
        assert!(value.get("day").is_none());
    }
}
