use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::bracket::RoundResponse;
use crate::dto::player::PlayerResponse;
use crate::models::event::{STATUS_COMPLETED, STATUS_SCHEDULED};
use crate::models::{Event, EventCategory};

/// Request payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub start_time: NaiveDateTime,

    pub end_time: NaiveDateTime,

    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "validate_category"))]
    pub category: String,

    #[validate(custom(function = "validate_status"))]
    #[serde(default = "default_status")]
    pub status: i16,

    #[validate(length(max = 32))]
    pub hex_icon: Option<String>,

    pub pair_id: Option<i32>,
}

/// Request payload for updating an existing event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub start_time: Option<NaiveDateTime>,

    pub end_time: Option<NaiveDateTime>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_status"))]
    pub status: Option<i16>,

    #[validate(length(max = 32))]
    pub hex_icon: Option<String>,

    pub pair_id: Option<i32>,
}

/// Request payload for moving an event to another status
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventStatusRequest {
    #[validate(custom(function = "validate_status"))]
    pub status: i16,
}

/// Final standings of an event, by player name
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PlacementRequest {
    #[validate(length(min = 1, message = "First place is required"))]
    pub first_place: String,

    #[validate(length(min = 1, message = "Second place is required"))]
    pub second_place: String,

    #[validate(length(min = 1, message = "Third place is required"))]
    pub third_place: String,
}

impl PlacementRequest {
    pub fn names(&self) -> [&str; 3] {
        [
            self.first_place.trim(),
            self.second_place.trim(),
            self.third_place.trim(),
        ]
    }
}

/// Points credited to a house for one placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PointsAward {
    pub place: u8,
    pub player_id: i32,
    pub house_id: String,
    pub points: i32,
}

/// Result of recording placements
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlacementResponse {
    pub event_id: i32,
    pub awarded: Vec<PointsAward>,
    pub revoked: Vec<PointsAward>,
}

/// Response containing event details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub id: i32,
    pub name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub description: String,
    pub category: String,
    pub status: i16,
    pub hex_icon: Option<String>,
    pub pair_id: Option<i32>,
    pub has_pair: bool,
    pub first_place_id: Option<i32>,
    pub second_place_id: Option<i32>,
    pub third_place_id: Option<i32>,
}

/// Event list entry with the name of its winner, if recorded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventSummary {
    pub id: i32,
    pub name: String,
    pub status: i16,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub category: String,
    pub hex_icon: Option<String>,
    pub winner: Option<String>,
}

/// Events starting on the same calendar day
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimetableDay {
    pub date: NaiveDate,
    pub events: Vec<EventResponse>,
}

impl TimetableDay {
    /// Groups events that are already sorted by start time.
    pub fn group(events: Vec<Event>) -> Vec<Self> {
        let mut days: Vec<TimetableDay> = Vec::new();

        for event in events {
            let date = event.start_time.date();
            match days.last_mut() {
                Some(day) if day.date == date => day.events.push(event.into()),
                _ => days.push(TimetableDay {
                    date,
                    events: vec![event.into()],
                }),
            }
        }

        days
    }
}

/// Event with its placements and bracket
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDetailResponse {
    pub event: EventResponse,
    /// 1st, 2nd and 3rd place, `null` where not recorded
    pub placements: Vec<Option<PlayerResponse>>,
    pub rounds: Vec<RoundResponse>,
}

fn default_status() -> i16 {
    STATUS_SCHEDULED
}

fn validate_status(status: i16) -> Result<(), validator::ValidationError> {
    if (STATUS_SCHEDULED..=STATUS_COMPLETED).contains(&status) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_status"))
    }
}

fn validate_category(category: &str) -> Result<(), validator::ValidationError> {
    category
        .parse::<EventCategory>()
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_category"))
}

impl CreateEventRequest {
    pub fn validate_times(&self) -> Result<(), &'static str> {
        if self.end_time < self.start_time {
            return Err("End time must be on or after start time");
        }
        Ok(())
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            has_pair: event.has_pair(),
            id: event.id,
            name: event.name,
            start_time: event.start_time,
            end_time: event.end_time,
            description: event.description,
            category: event.category,
            status: event.status,
            hex_icon: event.hex_icon,
            pair_id: event.pair_id,
            first_place_id: event.first_place_id,
            second_place_id: event.second_place_id,
            third_place_id: event.third_place_id,
        }
    }
}
