use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::bracket::{BuildBracketRequest, MatchResponse, RoundResponse, ScoreRequest},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events/{id}/rounds",
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Every bracket round from the seeds up", body = Vec<RoundResponse>)
    ),
    tag = "brackets"
)]
pub async fn list_rounds(
    State(db): State<Database>,
    Path(event_id): Path<i32>,
) -> Result<Json<Vec<RoundResponse>>, WebError> {
    let rounds = services::list_rounds(db.pool(), event_id).await?;
    let response = services::resolve_names(db.pool(), rounds).await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/bracket",
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    request_body = BuildBracketRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Bracket rebuilt", body = Vec<RoundResponse>),
        (status = 400, description = "Unknown participant or validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 422, description = "Participant count does not fit the bracket format")
    ),
    tag = "brackets"
)]
pub async fn build_bracket(
    State(db): State<Database>,
    Path(event_id): Path<i32>,
    Json(req): Json<BuildBracketRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let names = req.cleaned_names();
    let rounds = services::build_bracket(db.pool(), event_id, &names).await?;

    Ok((StatusCode::CREATED, Json(rounds)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/events/{id}/matches/{match_id}/score",
    params(
        ("id" = i32, Path, description = "Event ID"),
        ("match_id" = i32, Path, description = "Match ID")
    ),
    request_body = ScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Score recorded and winner advanced", body = MatchResponse),
        (status = 400, description = "Winner is not playing this match"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match not found")
    ),
    tag = "brackets"
)]
pub async fn record_score(
    State(db): State<Database>,
    Path((event_id, match_id)): Path<(i32, i32)>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<MatchResponse>, WebError> {
    req.validate()?;

    let updated = services::record_score(db.pool(), event_id, match_id, &req).await?;

    Ok(Json(updated))
}
