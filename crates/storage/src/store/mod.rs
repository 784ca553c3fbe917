//! Seams between the bracket logic and where match records live.
//!
//! `PgMatchStore` (in `repository::matches`) is the production
//! implementation and is normally handed a transaction, so everything done
//! through one store commits or rolls back together.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{MatchRecord, NewMatch};

#[cfg(test)]
pub mod memory;

#[async_trait]
pub trait MatchStore: Send {
    /// Insert a match and return it with its assigned id
    async fn create(&mut self, new: NewMatch) -> Result<MatchRecord>;

    /// Fetch one match, `StorageError::NotFound` if absent
    async fn get(&mut self, id: i32) -> Result<MatchRecord>;

    /// All matches of one round of an event, in creation order
    async fn query(&mut self, event_id: i32, round: i32) -> Result<Vec<MatchRecord>>;

    /// Persist scores, winner and player slots of an existing match
    async fn save(&mut self, record: &MatchRecord) -> Result<()>;

    /// Remove every match of an event, returning how many were removed
    async fn delete_all(&mut self, event_id: i32) -> Result<u64>;

    /// Highest match id in the store, 0 when empty
    async fn max_id(&mut self) -> Result<i32>;
}

#[async_trait]
pub trait ParticipantDirectory: Send {
    /// Look a participant up by display name
    async fn resolve(&mut self, name: &str) -> Result<Option<i32>>;
}
