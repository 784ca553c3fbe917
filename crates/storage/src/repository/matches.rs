use async_trait::async_trait;
use sqlx::PgConnection;

use crate::error::{Result, StorageError};
use crate::models::{MatchRecord, NewMatch};
use crate::store::{MatchStore, ParticipantDirectory};

/// Postgres-backed match store.
///
/// Holds a borrowed connection; hand it `&mut *tx` to make every write part
/// of one transaction.
pub struct PgMatchStore<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgMatchStore<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl MatchStore for PgMatchStore<'_> {
    async fn create(&mut self, new: NewMatch) -> Result<MatchRecord> {
        let record = sqlx::query_as::<_, MatchRecord>(
            r#"
            INSERT INTO matches (
                event_id, round, last_match1_id, last_match2_id,
                player1_id, player2_id, score1, score2, winner_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, 0, 0, $7)
            RETURNING id, event_id, round, last_match1_id, last_match2_id,
                      player1_id, player2_id, score1, score2, winner_id
            "#,
        )
        .bind(new.event_id)
        .bind(new.round)
        .bind(new.last_match1_id)
        .bind(new.last_match2_id)
        .bind(new.player1_id)
        .bind(new.player2_id)
        .bind(new.winner_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(record)
    }

    async fn get(&mut self, id: i32) -> Result<MatchRecord> {
        let record = sqlx::query_as::<_, MatchRecord>(
            r#"
            SELECT id, event_id, round, last_match1_id, last_match2_id,
                   player1_id, player2_id, score1, score2, winner_id
            FROM matches
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(record)
    }

    async fn query(&mut self, event_id: i32, round: i32) -> Result<Vec<MatchRecord>> {
        let records = sqlx::query_as::<_, MatchRecord>(
            r#"
            SELECT id, event_id, round, last_match1_id, last_match2_id,
                   player1_id, player2_id, score1, score2, winner_id
            FROM matches
            WHERE event_id = $1 AND round = $2
            ORDER BY id
            "#,
        )
        .bind(event_id)
        .bind(round)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records)
    }

    async fn save(&mut self, record: &MatchRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE matches
            SET player1_id = $2, player2_id = $3, score1 = $4, score2 = $5, winner_id = $6
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(record.player1_id)
        .bind(record.player2_id)
        .bind(record.score1)
        .bind(record.score2)
        .bind(record.winner_id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn delete_all(&mut self, event_id: i32) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM matches
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected())
    }

    async fn max_id(&mut self) -> Result<i32> {
        let max = sqlx::query_scalar::<_, Option<i32>>("SELECT MAX(id) FROM matches")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(max.unwrap_or(0))
    }
}

#[async_trait]
impl ParticipantDirectory for PgMatchStore<'_> {
    async fn resolve(&mut self, name: &str) -> Result<Option<i32>> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT id
            FROM players
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(id)
    }
}
