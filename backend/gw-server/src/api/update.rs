use crate::api::error::Result as ApiResult;
use crate::api::extractors::actor::Actor;
use crate::AppState;

use gw_core::{UpdateRunRequest, UpdateRunResponse};

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use log::info;

/// POST /api/v1/update/run
///
/// Always answers 200 with the orchestrator's response once the body parses;
/// update failures are reported inside it (`ok: false`).
pub async fn run_update(
    State(state): State<AppState>,
    Actor(actor): Actor,
    payload: Result<Json<UpdateRunRequest>, JsonRejection>,
) -> ApiResult<Json<UpdateRunResponse>> {
    let Json(request) = payload?;

    info!(
        "update.run requested {actor} sessionKey={}",
        request.session_key
    );

    let response = state.orchestrator.run(request, &actor).await;

    Ok(Json(response))
}
