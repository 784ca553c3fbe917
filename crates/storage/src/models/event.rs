use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A scheduled competition (one sport or discipline) owning a bracket.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub description: String,
    pub category: String,
    pub status: i16,
    pub hex_icon: Option<String>,
    pub pair_id: Option<i32>,
    pub first_place_id: Option<i32>,
    pub second_place_id: Option<i32>,
    pub third_place_id: Option<i32>,
}

impl Event {
    pub fn has_pair(&self) -> bool {
        self.pair_id.is_some_and(|pair| pair != self.id)
    }

    pub fn placements(&self) -> [Option<i32>; 3] {
        [self.first_place_id, self.second_place_id, self.third_place_id]
    }
}

pub const STATUS_SCHEDULED: i16 = 0;
pub const STATUS_IN_PROGRESS: i16 = 1;
pub const STATUS_COMPLETED: i16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EventCategory {
    Individual,
    Team,
    House,
}

impl EventCategory {
    pub const ALL: [EventCategory; 3] = [Self::Individual, Self::Team, Self::House];

    /// House points for 1st, 2nd and 3rd place.
    pub fn placement_points(self) -> [i32; 3] {
        match self {
            Self::Individual => [25, 20, 15],
            Self::Team => [50, 45, 40],
            Self::House => [75, 65, 55],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Team => "Team",
            Self::House => "House",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown event category '{}'", s))
    }
}
