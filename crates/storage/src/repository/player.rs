use std::collections::HashMap;

use sqlx::PgPool;

use crate::dto::player::{CreatePlayerRequest, UpdatePlayerRequest};
use crate::error::{Result, StorageError};
use crate::models::Player;

pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all players by name
    pub async fn list(&self) -> Result<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            r#"
            SELECT id, name, medals, house_id1, house_id2
            FROM players
            ORDER BY name ASC, id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(players)
    }

    /// Display names of every player, keyed by id
    pub async fn whole_names(&self) -> Result<HashMap<i32, String>> {
        let players = self.list().await?;
        Ok(players
            .into_iter()
            .map(|player| (player.id, player.whole_name()))
            .collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            SELECT id, name, medals, house_id1, house_id2
            FROM players
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(player)
    }

    /// Names containing `fragment`, case-insensitively
    pub async fn search_names(&self, fragment: &str, limit: i64) -> Result<Vec<String>> {
        let pattern = format!("%{}%", escape_like(fragment));

        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name
            FROM players
            WHERE name ILIKE $1 ESCAPE '\'
            ORDER BY name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(names)
    }

    pub async fn create(&self, req: &CreatePlayerRequest) -> Result<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (name, medals, house_id1, house_id2)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, medals, house_id1, house_id2
            "#,
        )
        .bind(&req.name)
        .bind(req.medals)
        .bind(&req.house_id1)
        .bind(&req.house_id2)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).or_constraint("Unknown house"))?;

        Ok(player)
    }

    pub async fn update(&self, existing: &Player, req: &UpdatePlayerRequest) -> Result<Player> {
        let house_id2 = match &req.house_id2 {
            Some(value) => value.clone(),
            None => existing.house_id2.clone(),
        };

        let player = sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET name = $2, medals = $3, house_id1 = $4, house_id2 = $5
            WHERE id = $1
            RETURNING id, name, medals, house_id1, house_id2
            "#,
        )
        .bind(existing.id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.medals.unwrap_or(existing.medals))
        .bind(req.house_id1.as_ref().unwrap_or(&existing.house_id1))
        .bind(house_id2)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).or_constraint("Unknown house"))?
        .ok_or(StorageError::NotFound)?;

        Ok(player)
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM players
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
