use axum::{
    Json,
    extract::{Path, State},
};
use storage::{
    Database,
    dto::house::{HouseRanking, UpdateHousePointsRequest},
    models::House,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/houses",
    responses(
        (status = 200, description = "Houses ranked by points", body = Vec<HouseRanking>)
    ),
    tag = "houses"
)]
pub async fn list_houses(State(db): State<Database>) -> Result<Json<Vec<HouseRanking>>, WebError> {
    let rankings = services::list_rankings(db.pool()).await?;

    Ok(Json(rankings))
}

#[utoipa::path(
    put,
    path = "/api/houses/{id}/points",
    params(
        ("id" = String, Path, description = "Two-character house code")
    ),
    request_body = UpdateHousePointsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Points updated", body = House),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "House not found")
    ),
    tag = "houses"
)]
pub async fn update_house_points(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(req): Json<UpdateHousePointsRequest>,
) -> Result<Json<House>, WebError> {
    req.validate()?;

    let house = services::set_points(db.pool(), &id, req.points).await?;
    tracing::info!(house = %house.id, points = house.points, "House points updated");

    Ok(Json(house))
}
