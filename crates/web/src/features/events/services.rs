use sqlx::PgPool;
use storage::{
    dto::{
        bracket::RoundResponse,
        event::{
            CreateEventRequest, EventDetailResponse, EventSummary, PlacementRequest,
            PlacementResponse, TimetableDay, UpdateEventRequest,
        },
        player::PlayerResponse,
    },
    error::{Result, StorageError},
    models::Event,
    repository::{event::EventRepository, player::PlayerRepository},
    services::standings,
};

use crate::features::brackets::services as brackets;

/// List events, in-progress and completed first, with their winner's name
pub async fn list_summaries(pool: &PgPool) -> Result<Vec<EventSummary>> {
    let events = EventRepository::new(pool).list().await?;
    let names = PlayerRepository::new(pool).whole_names().await?;

    let summaries = events
        .into_iter()
        .map(|event| EventSummary {
            winner: event
                .first_place_id
                .and_then(|id| names.get(&id).cloned()),
            id: event.id,
            name: event.name,
            status: event.status,
            start_time: event.start_time,
            end_time: event.end_time,
            category: event.category,
            hex_icon: event.hex_icon,
        })
        .collect();

    Ok(summaries)
}

/// Events grouped by the day they start on
pub async fn timetable(pool: &PgPool) -> Result<Vec<TimetableDay>> {
    let events = EventRepository::new(pool).list_by_start().await?;
    Ok(TimetableDay::group(events))
}

/// An event with its placements and every played round of its bracket
pub async fn get_detail(pool: &PgPool, id: i32) -> Result<EventDetailResponse> {
    let event = EventRepository::new(pool).find_by_id(id).await?;
    let players = PlayerRepository::new(pool);

    let mut placements = Vec::with_capacity(3);
    for player_id in event.placements() {
        let player = match player_id {
            Some(player_id) => match players.find_by_id(player_id).await {
                Ok(player) => Some(PlayerResponse::from(player)),
                Err(StorageError::NotFound) => None,
                Err(e) => return Err(e),
            },
            None => None,
        };
        placements.push(player);
    }

    let rounds = brackets::list_rounds(pool, id)
        .await?
        .into_iter()
        .filter(|round| round.round > 0)
        .collect();
    let rounds: Vec<RoundResponse> = brackets::resolve_names(pool, rounds).await?;

    Ok(EventDetailResponse {
        event: event.into(),
        placements,
        rounds,
    })
}

pub async fn create_event(pool: &PgPool, request: &CreateEventRequest) -> Result<Event> {
    EventRepository::new(pool).create(request).await
}

pub async fn update_event(pool: &PgPool, id: i32, request: &UpdateEventRequest) -> Result<Event> {
    let repo = EventRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

pub async fn set_status(pool: &PgPool, id: i32, status: i16) -> Result<Event> {
    EventRepository::new(pool).set_status(id, status).await
}

pub async fn delete_event(pool: &PgPool, id: i32) -> Result<()> {
    EventRepository::new(pool).delete(id).await
}

/// Record the top three and credit their houses
pub async fn record_placements(
    pool: &PgPool,
    id: i32,
    request: &PlacementRequest,
) -> Result<PlacementResponse> {
    standings::record_placements(pool, id, request.names()).await
}
