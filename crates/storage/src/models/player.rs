use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub medals: i32,
    pub house_id1: String,
    pub house_id2: Option<String>,
}

impl Player {
    /// Display name. Players shared between two houses are shown by name
    /// alone, everyone else is prefixed with their house code.
    pub fn whole_name(&self) -> String {
        if self.house_id2.is_some() {
            self.name.clone()
        } else {
            format!("{} {}", self.house_id1, self.name)
        }
    }
}
