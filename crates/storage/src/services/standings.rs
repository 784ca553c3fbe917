//! Manual placements and the house points they award.
//!
//! Placements are recorded by hand once an event is over and are independent
//! of the bracket's own results. Every award is stored with the house it
//! credited, so re-recording takes points back from that same house even if
//! the player has moved since.

use std::collections::BTreeMap;

use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::info;

use crate::dto::event::{PlacementResponse, PointsAward};
use crate::error::{Result, StorageError};
use crate::models::{Event, EventCategory, Player};

/// Awards for `placed` (1st, 2nd, 3rd) under `category`.
pub fn placement_awards(category: EventCategory, placed: &[Player; 3]) -> Vec<PointsAward> {
    placed
        .iter()
        .zip(category.placement_points())
        .zip(1u8..)
        .map(|((player, points), place)| PointsAward {
            place,
            player_id: player.id,
            house_id: player.house_id1.clone(),
            points,
        })
        .collect()
}

/// Net change per house of taking back `revoked` and crediting `awarded`.
pub fn house_deltas(revoked: &[PointsAward], awarded: &[PointsAward]) -> BTreeMap<String, i32> {
    let mut deltas = BTreeMap::new();
    for award in revoked {
        *deltas.entry(award.house_id.clone()).or_insert(0) -= award.points;
    }
    for award in awarded {
        *deltas.entry(award.house_id.clone()).or_insert(0) += award.points;
    }
    deltas
}

#[derive(Debug, FromRow)]
struct AwardRow {
    place: i16,
    player_id: i32,
    house_id: String,
    points: i32,
}

impl From<AwardRow> for PointsAward {
    fn from(row: AwardRow) -> Self {
        Self {
            place: u8::try_from(row.place).unwrap_or_default(),
            player_id: row.player_id,
            house_id: row.house_id,
            points: row.points,
        }
    }
}

/// Record the top three of an event and credit their houses.
///
/// Points awarded by placements recorded earlier are taken back first, so
/// correcting a result never credits a house twice.
pub async fn record_placements(
    pool: &PgPool,
    event_id: i32,
    names: [&str; 3],
) -> Result<PlacementResponse> {
    let mut tx = pool.begin().await?;

    let event = sqlx::query_as::<_, Event>(
        r#"
        SELECT id, name, start_time, end_time, description, category, status,
               hex_icon, pair_id, first_place_id, second_place_id, third_place_id
        FROM events
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(event_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(StorageError::NotFound)?;

    let category: EventCategory = event
        .category
        .parse()
        .map_err(StorageError::InvalidInput)?;

    let mut missing = Vec::new();
    let mut placed = Vec::with_capacity(3);
    for name in names {
        match find_player_by_name(&mut tx, name).await? {
            Some(player) => placed.push(player),
            None => missing.push(name),
        }
    }
    if !missing.is_empty() {
        return Err(StorageError::InvalidInput(format!(
            "One or more players not found: {}",
            missing.join(", ")
        )));
    }
    let placed: [Player; 3] = placed
        .try_into()
        .map_err(|_| StorageError::InvalidInput("Exactly three placements are required".into()))?;

    let revoked = take_previous_awards(&mut tx, event_id).await?;
    let awarded = placement_awards(category, &placed);

    for (house_id, delta) in house_deltas(&revoked, &awarded) {
        add_house_points(&mut tx, &house_id, delta).await?;
    }
    for award in &awarded {
        store_award(&mut tx, event_id, award).await?;
    }

    sqlx::query(
        r#"
        UPDATE events
        SET first_place_id = $2, second_place_id = $3, third_place_id = $4
        WHERE id = $1
        "#,
    )
    .bind(event_id)
    .bind(placed[0].id)
    .bind(placed[1].id)
    .bind(placed[2].id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        event_id,
        awarded = awarded.len(),
        revoked = revoked.len(),
        "Placements recorded"
    );

    Ok(PlacementResponse {
        event_id,
        awarded,
        revoked,
    })
}

async fn find_player_by_name(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
) -> Result<Option<Player>> {
    let player = sqlx::query_as::<_, Player>(
        r#"
        SELECT id, name, medals, house_id1, house_id2
        FROM players
        WHERE name = $1
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(player)
}

/// Remove and return the awards stored for an event.
async fn take_previous_awards(
    tx: &mut Transaction<'_, Postgres>,
    event_id: i32,
) -> Result<Vec<PointsAward>> {
    let rows = sqlx::query_as::<_, AwardRow>(
        r#"
        DELETE FROM placement_awards
        WHERE event_id = $1
        RETURNING place, player_id, house_id, points
        "#,
    )
    .bind(event_id)
    .fetch_all(&mut **tx)
    .await?;

    let mut awards: Vec<PointsAward> = rows.into_iter().map(PointsAward::from).collect();
    awards.sort_by_key(|award| award.place);
    Ok(awards)
}

async fn store_award(
    tx: &mut Transaction<'_, Postgres>,
    event_id: i32,
    award: &PointsAward,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO placement_awards (event_id, place, player_id, house_id, points)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(event_id)
    .bind(i16::from(award.place))
    .bind(award.player_id)
    .bind(&award.house_id)
    .bind(award.points)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Houses that no longer exist are skipped, and points never drop below zero.
async fn add_house_points(
    tx: &mut Transaction<'_, Postgres>,
    house_id: &str,
    delta: i32,
) -> Result<()> {
    if delta == 0 {
        return Ok(());
    }

    sqlx::query(
        r#"
        UPDATE houses
        SET points = GREATEST(points + $2, 0)
        WHERE id = $1
        "#,
    )
    .bind(house_id)
    .bind(delta)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
