use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::Player;

/// Response containing player information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerResponse {
    pub id: i32,
    pub name: String,
    pub whole_name: String,
    pub medals: i32,
    pub house_id1: String,
    pub house_id2: Option<String>,
}

/// Request payload for creating a new player
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlayerRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(range(min = 0, message = "Medals cannot be negative"))]
    #[serde(default)]
    pub medals: i32,

    #[validate(custom(function = "validate_house_code"))]
    pub house_id1: String,

    #[validate(custom(function = "validate_house_code"))]
    pub house_id2: Option<String>,
}

/// Request payload for updating an existing player
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlayerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(range(min = 0))]
    pub medals: Option<i32>,

    #[validate(custom(function = "validate_house_code"))]
    pub house_id1: Option<String>,

    /// `null` clears the secondary house, leaving it out keeps it
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub house_id2: Option<Option<String>>,
}

impl UpdatePlayerRequest {
    pub fn validate_secondary_house(&self) -> Result<(), &'static str> {
        if let Some(Some(code)) = &self.house_id2
            && validate_house_code(code).is_err()
        {
            return Err("Secondary house must be a two-character house code");
        }
        Ok(())
    }
}

/// Query parameters for player name autocomplete
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AutocompleteParams {
    /// Part of a player name, matched case-insensitively
    #[serde(default)]
    pub q: String,
}

fn validate_house_code(code: &str) -> Result<(), validator::ValidationError> {
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_house_code"))
    }
}

mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn serialize<S: serde::Serializer>(
        value: &Option<Option<String>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => serializer.serialize_some(inner),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<String>>, D::Error> {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            whole_name: player.whole_name(),
            id: player.id,
            name: player.name,
            medals: player.medals,
            house_id1: player.house_id1,
            house_id2: player.house_id2,
        }
    }
}
