use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::event::{
        CreateEventRequest, EventDetailResponse, EventResponse, EventSummary, PlacementRequest,
        PlacementResponse, TimetableDay, UpdateEventRequest, UpdateEventStatusRequest,
    },
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "List events with their winners", body = Vec<EventSummary>)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(db): State<Database>,
) -> Result<Json<Vec<EventSummary>>, WebError> {
    let events = services::list_summaries(db.pool()).await?;

    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/events/timetable",
    responses(
        (status = 200, description = "Events grouped by start day", body = Vec<TimetableDay>)
    ),
    tag = "events"
)]
pub async fn get_timetable(
    State(db): State<Database>,
) -> Result<Json<Vec<TimetableDay>>, WebError> {
    let days = services::timetable(db.pool()).await?;

    Ok(Json(days))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event with placements and bracket", body = EventDetailResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> Result<Json<EventDetailResponse>, WebError> {
    let detail = services::get_detail(db.pool(), id).await?;

    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(db): State<Database>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    req.validate_times()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let event = services::create_event(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    request_body = UpdateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(db): State<Database>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, WebError> {
    req.validate()?;

    let event = services::update_event(db.pool(), id, &req).await?;

    Ok(Json(EventResponse::from(event)))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}/status",
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    request_body = UpdateEventStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status changed", body = EventResponse),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn update_event_status(
    State(db): State<Database>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateEventStatusRequest>,
) -> Result<Json<EventResponse>, WebError> {
    req.validate()?;

    let event = services::set_status(db.pool(), id, req.status).await?;

    Ok(Json(EventResponse::from(event)))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}/placements",
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    request_body = PlacementRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Placements recorded and house points credited", body = PlacementResponse),
        (status = 400, description = "Unknown player"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn record_placements(
    State(db): State<Database>,
    Path(id): Path<i32>,
    Json(req): Json<PlacementRequest>,
) -> Result<Json<PlacementResponse>, WebError> {
    req.validate()?;

    let response = services::record_placements(db.pool(), id, &req).await?;

    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(
        ("id" = i32, Path, description = "Event ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Event and its bracket deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> Result<StatusCode, WebError> {
    services::delete_event(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}
