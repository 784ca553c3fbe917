use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct House {
    pub id: String,
    pub name: String,
    pub color: String,
    pub points: i32,
}

/// Houses every installation starts with: `(id, name, color)`.
pub const DEFAULT_HOUSES: &[(&str, &str, &str)] = &[
    ("A3", "Bari", "#FFD733"),
    ("A4", "Ikhaya", "#FFFFFF"),
    ("A5", "Ruka", "#14B4B7"),
    ("A6", "Meraki", "#0B7FCF"),
    ("B3", "Baile", "#0F5D10"),
    ("B4", "Hogan", "#7D0D0D"),
    ("B5", "Heimat", "#4F0606"),
    ("C3", "Bandele", "#620071"),
    ("C4", "Bayt", "#0B8FAD"),
    ("C5", "Efie", "#E78715"),
    ("C6", "Ohana", "#EF5DC7"),
    ("F0", "Faculty Team", "#000000"),
];
