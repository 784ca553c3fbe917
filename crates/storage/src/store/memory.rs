use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use super::{MatchStore, ParticipantDirectory};
use crate::error::{Result, StorageError};
use crate::models::{MatchRecord, NewMatch};

/// Match store kept in memory for exercising bracket logic without Postgres.
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    matches: BTreeMap<i32, MatchRecord>,
    players: HashMap<String, i32>,
}

impl InMemoryMatchStore {
    /// Registers players `1..=names.len()` in the given order.
    pub fn with_players(names: &[&str]) -> Self {
        let players = names
            .iter()
            .zip(1..)
            .map(|(name, id)| (name.to_string(), id))
            .collect();

        Self {
            players,
            ..Self::default()
        }
    }

    pub fn player_id(&self, name: &str) -> i32 {
        self.players[name]
    }

    pub fn matches_of(&self, event_id: i32) -> Vec<&MatchRecord> {
        self.matches
            .values()
            .filter(|record| record.event_id == event_id)
            .collect()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn create(&mut self, new: NewMatch) -> Result<MatchRecord> {
        let id = self.max_id().await? + 1;
        let record = new.into_record(id);
        self.matches.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&mut self, id: i32) -> Result<MatchRecord> {
        self.matches.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn query(&mut self, event_id: i32, round: i32) -> Result<Vec<MatchRecord>> {
        Ok(self
            .matches
            .values()
            .filter(|record| record.event_id == event_id && record.round == round)
            .cloned()
            .collect())
    }

    async fn save(&mut self, record: &MatchRecord) -> Result<()> {
        let slot = self
            .matches
            .get_mut(&record.id)
            .ok_or(StorageError::NotFound)?;
        *slot = record.clone();
        Ok(())
    }

    async fn delete_all(&mut self, event_id: i32) -> Result<u64> {
        let before = self.matches.len();
        self.matches.retain(|_, record| record.event_id != event_id);
        Ok((before - self.matches.len()) as u64)
    }

    async fn max_id(&mut self) -> Result<i32> {
        Ok(self.matches.keys().next_back().copied().unwrap_or(0))
    }
}

#[async_trait]
impl ParticipantDirectory for InMemoryMatchStore {
    async fn resolve(&mut self, name: &str) -> Result<Option<i32>> {
        Ok(self.players.get(name).copied())
    }
}
