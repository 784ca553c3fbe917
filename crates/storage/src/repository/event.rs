use sqlx::PgPool;

use crate::dto::event::{CreateEventRequest, UpdateEventRequest};
use crate::error::{Result, StorageError};
use crate::models::Event;

const EVENT_COLUMNS: &str = "id, name, start_time, end_time, description, category, status, \
     hex_icon, pair_id, first_place_id, second_place_id, third_place_id";

/// Repository for Event database operations
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all events, running and finished ones first
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY status DESC, start_time, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// List all events in the order they start
    pub async fn list_by_start(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_time, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Get an event by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Create a new event
    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (
                name, start_time, end_time, description, category, status, hex_icon, pair_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(req.start_time)
        .bind(req.end_time)
        .bind(&req.description)
        .bind(&req.category)
        .bind(req.status)
        .bind(&req.hex_icon)
        .bind(req.pair_id)
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }

    /// Update an existing event, keeping fields the request leaves out
    pub async fn update(&self, existing: &Event, req: &UpdateEventRequest) -> Result<Event> {
        let start_time = req.start_time.unwrap_or(existing.start_time);
        let end_time = req.end_time.unwrap_or(existing.end_time);
        if end_time < start_time {
            return Err(StorageError::InvalidInput(
                "End time must be on or after start time".to_string(),
            ));
        }

        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET
                name = $2,
                start_time = $3,
                end_time = $4,
                description = $5,
                category = $6,
                status = $7,
                hex_icon = $8,
                pair_id = $9
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(existing.id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(start_time)
        .bind(end_time)
        .bind(req.description.as_ref().unwrap_or(&existing.description))
        .bind(req.category.as_ref().unwrap_or(&existing.category))
        .bind(req.status.unwrap_or(existing.status))
        .bind(req.hex_icon.as_ref().or(existing.hex_icon.as_ref()))
        .bind(req.pair_id.or(existing.pair_id))
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub async fn set_status(&self, id: i32, status: i16) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET status = $2 WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Delete an event and, through the foreign key, its matches
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM events
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
