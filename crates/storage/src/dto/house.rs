use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::House;

/// A house together with its position in the points table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HouseRanking {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub color: String,
    pub points: i32,
}

impl HouseRanking {
    /// Ranks houses that are already sorted by points, best first.
    pub fn rank_all(houses: Vec<House>) -> Vec<Self> {
        houses
            .into_iter()
            .enumerate()
            .map(|(index, house)| Self {
                rank: index + 1,
                id: house.id,
                name: house.name,
                color: house.color,
                points: house.points,
            })
            .collect()
    }
}

/// Request payload for overwriting a house's points
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateHousePointsRequest {
    #[validate(range(min = 0, message = "Points cannot be negative"))]
    pub points: i32,
}
