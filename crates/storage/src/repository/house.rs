use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::House;
use crate::models::house::DEFAULT_HOUSES;

/// Repository for House database operations
pub struct HouseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HouseRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List houses, most points first
    pub async fn list_by_points(&self) -> Result<Vec<House>> {
        let houses = sqlx::query_as::<_, House>(
            r#"
            SELECT id, name, color, points
            FROM houses
            ORDER BY points DESC, id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(houses)
    }

    /// Overwrite a house's points
    pub async fn set_points(&self, id: &str, points: i32) -> Result<House> {
        let house = sqlx::query_as::<_, House>(
            r#"
            UPDATE houses
            SET points = $2
            WHERE id = $1
            RETURNING id, name, color, points
            "#,
        )
        .bind(id)
        .bind(points)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(house)
    }

    /// Insert the default houses and one player per house where missing.
    /// Returns how many houses were added.
    pub async fn seed_defaults(&self) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut added = 0;

        for &(id, name, color) in DEFAULT_HOUSES {
            let result = sqlx::query(
                r#"
                INSERT INTO houses (id, name, color, points)
                VALUES ($1, $2, $3, 0)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(id)
            .bind(name)
            .bind(color)
            .execute(&mut *tx)
            .await?;
            added += result.rows_affected();
        }

        sqlx::query(
            r#"
            INSERT INTO players (name, medals, house_id1)
            SELECT h.id || ' ' || h.name, 0, h.id
            FROM houses h
            WHERE NOT EXISTS (SELECT 1 FROM players p WHERE p.house_id1 = h.id)
            "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(added)
    }
}
