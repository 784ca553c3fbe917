use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::MatchRecord;
use crate::services::bracket::{BracketRound, MatchOutcome};

/// Request payload for (re)building an event's bracket
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BuildBracketRequest {
    /// Player names in seeding order
    #[validate(length(min = 1, message = "At least one participant is required"))]
    pub participant_names: Vec<String>,
}

impl BuildBracketRequest {
    /// Names with surrounding whitespace removed, in seeding order. Blank
    /// entries are kept so they fail to resolve like any other unknown name.
    pub fn cleaned_names(&self) -> Vec<String> {
        self.participant_names
            .iter()
            .map(|name| name.trim().to_string())
            .collect()
    }
}

/// Request payload for entering the result of a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ScoreRequest {
    #[validate(range(min = 0, message = "Scores cannot be negative"))]
    pub score1: i32,

    #[validate(range(min = 0, message = "Scores cannot be negative"))]
    pub score2: i32,

    pub winner_id: i32,
}

impl From<&ScoreRequest> for MatchOutcome {
    fn from(req: &ScoreRequest) -> Self {
        Self {
            score1: req.score1,
            score2: req.score2,
            winner_id: req.winner_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlayerRef {
    pub id: i32,
    pub name: String,
}

/// A match with its players resolved to display names
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchResponse {
    pub id: i32,
    pub round: i32,
    pub last_match1_id: Option<i32>,
    pub last_match2_id: Option<i32>,
    pub player1: Option<PlayerRef>,
    pub player2: Option<PlayerRef>,
    pub score1: i32,
    pub score2: i32,
    pub winner: Option<PlayerRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoundResponse {
    pub round: i32,
    pub matches: Vec<MatchResponse>,
}

impl MatchResponse {
    pub fn resolve(record: MatchRecord, names: &HashMap<i32, String>) -> Self {
        let player = |id: Option<i32>| {
            id.map(|id| PlayerRef {
                id,
                name: names.get(&id).cloned().unwrap_or_default(),
            })
        };

        Self {
            id: record.id,
            round: record.round,
            last_match1_id: record.last_match1_id,
            last_match2_id: record.last_match2_id,
            player1: player(record.player1_id),
            player2: player(record.player2_id),
            score1: record.score1,
            score2: record.score2,
            winner: player(record.winner_id),
        }
    }
}

impl RoundResponse {
    pub fn resolve_all(rounds: Vec<BracketRound>, names: &HashMap<i32, String>) -> Vec<Self> {
        rounds
            .into_iter()
            .map(|round| Self {
                round: round.round,
                matches: round
                    .matches
                    .into_iter()
                    .map(|record| MatchResponse::resolve(record, names))
                    .collect(),
            })
            .collect()
    }
}
