use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One node of an event's bracket.
///
/// Round-0 records are seeds: they have no predecessors and carry their
/// participant in `winner_id`. Every other record is fed by the winners of
/// `last_match1_id` and `last_match2_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MatchRecord {
    pub id: i32,
    pub event_id: i32,
    pub round: i32,
    pub last_match1_id: Option<i32>,
    pub last_match2_id: Option<i32>,
    pub player1_id: Option<i32>,
    pub player2_id: Option<i32>,
    pub score1: i32,
    pub score2: i32,
    pub winner_id: Option<i32>,
}

impl MatchRecord {
    pub fn has_player(&self, player_id: i32) -> bool {
        self.player1_id == Some(player_id) || self.player2_id == Some(player_id)
    }
}

/// A match that has not been inserted yet. Scores always start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub event_id: i32,
    pub round: i32,
    pub last_match1_id: Option<i32>,
    pub last_match2_id: Option<i32>,
    pub player1_id: Option<i32>,
    pub player2_id: Option<i32>,
    pub winner_id: Option<i32>,
}

impl NewMatch {
    pub fn seed(event_id: i32, player_id: i32) -> Self {
        Self {
            event_id,
            round: 0,
            last_match1_id: None,
            last_match2_id: None,
            player1_id: None,
            player2_id: None,
            winner_id: Some(player_id),
        }
    }

    /// Pairs the winners of two earlier matches. The round is one past the
    /// later of the two.
    pub fn pairing(event_id: i32, first: &MatchRecord, second: &MatchRecord) -> Self {
        Self {
            event_id,
            round: first.round.max(second.round) + 1,
            last_match1_id: Some(first.id),
            last_match2_id: Some(second.id),
            player1_id: first.winner_id,
            player2_id: second.winner_id,
            winner_id: None,
        }
    }

    pub fn into_record(self, id: i32) -> MatchRecord {
        MatchRecord {
            id,
            event_id: self.event_id,
            round: self.round,
            last_match1_id: self.last_match1_id,
            last_match2_id: self.last_match2_id,
            player1_id: self.player1_id,
            player2_id: self.player2_id,
            score1: 0,
            score2: 0,
            winner_id: self.winner_id,
        }
    }
}

/// The kinds of round a bracket moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundKind {
    /// Round 0: one record per participant, nothing is played.
    Seed,
    /// Round 1: seeds paired two by two.
    Pairing,
    /// Round 2: round-1 winners paired, plus the reconciliation match that
    /// absorbs the leftovers of odd-sized rounds.
    Reconciled,
    /// Round 3: the three-way decider among the round-2 winners.
    Final,
}

impl RoundKind {
    pub fn for_round(round: i32) -> Option<Self> {
        match round {
            0 => Some(Self::Seed),
            1 => Some(Self::Pairing),
            2 => Some(Self::Reconciled),
            3 => Some(Self::Final),
            _ => None,
        }
    }

    pub fn round(self) -> i32 {
        match self {
            Self::Seed => 0,
            Self::Pairing => 1,
            Self::Reconciled => 2,
            Self::Final => 3,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Seed => Some(Self::Pairing),
            Self::Pairing => Some(Self::Reconciled),
            Self::Reconciled => Some(Self::Final),
            Self::Final => None,
        }
    }

    /// Whether a decided match of this kind hands its winner to the next round.
    pub fn feeds_next_round(self) -> bool {
        matches!(self, Self::Pairing | Self::Reconciled)
    }
}
